use super::*;

// =============================================================
// MemoryObjectUrls
// =============================================================

#[test]
fn memory_urls_are_unique_and_tracked() {
    let mut urls = MemoryObjectUrls::default();
    let a = urls.create(b"abc", Some("application/pdf")).unwrap();
    let b = urls.create(b"de", None).unwrap();
    assert_ne!(a, b);
    assert_eq!(urls.created[0], (a.clone(), Some("application/pdf".to_owned()), 3));
    assert_eq!(urls.created[1], (b.clone(), None, 2));
    assert_eq!(urls.live(), vec![a, b]);
}

#[test]
fn memory_urls_live_excludes_revoked() {
    let mut urls = MemoryObjectUrls::default();
    let a = urls.create(b"x", None).unwrap();
    let b = urls.create(b"y", None).unwrap();
    urls.revoke(&a);
    assert_eq!(urls.live(), vec![b]);
}

#[test]
fn memory_urls_can_simulate_failure() {
    let mut urls = MemoryObjectUrls { fail_with: Some("quota".to_owned()), ..MemoryObjectUrls::default() };
    assert_eq!(urls.create(b"x", None), Err("quota".to_owned()));
    assert!(urls.created.is_empty());
}

// =============================================================
// BrowserObjectUrls outside the browser
// =============================================================

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_urls_refuse_outside_browser() {
    let mut urls = BrowserObjectUrls;
    assert!(urls.create(b"x", Some("application/pdf")).is_err());
    urls.revoke("blob:ignored");
}
