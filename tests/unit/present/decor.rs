use super::*;

#[test]
fn icon_urls_are_distinct() {
    let mut urls: Vec<_> = Icon::ALL.iter().map(|i| i.url()).collect();
    urls.sort();
    urls.dedup();
    assert_eq!(urls.len(), Icon::ALL.len());
    assert!(Icon::Gift.url().ends_with("/1f381.svg"));
}

#[test]
fn heart_glyphs_are_distinct() {
    let mut glyphs = HEART_GLYPHS.to_vec();
    glyphs.sort();
    glyphs.dedup();
    assert_eq!(glyphs.len(), HEART_GLYPHS.len());
}
