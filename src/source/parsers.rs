use crate::models::RawRow;
use crate::source::ExtractionError;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

fn selector(css: &'static str) -> Result<Selector, ExtractionError> {
    Selector::parse(css).map_err(|e| ExtractionError::Selector {
        selector: css,
        reason: format!("{:?}", e),
    })
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

// ── Story rows ────────────────────────────────────────────────────────────────

/// Read up to `max_count` story rows from a listing document.
///
/// Every story is a `tr.athing` followed by a metadata row holding
/// `span.age[title]`. Missing cells come back as `None`; only a document with
/// no listing at all is an error.
pub fn parse_rows(
    html: &str,
    page_url: &Url,
    max_count: usize,
) -> Result<Vec<RawRow>, ExtractionError> {
    let doc = Html::parse_document(html);

    let row_sel = selector("tr.athing")?;
    let main_sel = selector("#hnmain")?;
    let rank_sel = selector("span.rank")?;
    let title_sel = selector("span.titleline > a")?;
    let legacy_title_sel = selector("td.title > a")?;
    let age_sel = selector("span.age")?;

    let mut story_rows = doc.select(&row_sel).peekable();
    if story_rows.peek().is_none() && doc.select(&main_sel).next().is_none() {
        return Err(ExtractionError::MissingListing(page_url.to_string()));
    }

    let rows: Vec<RawRow> = story_rows
        .take(max_count)
        .map(|tr| {
            let anchor = tr
                .select(&title_sel)
                .next()
                .or_else(|| tr.select(&legacy_title_sel).next());

            let age = metadata_row(tr)
                .and_then(|meta| meta.select(&age_sel).next())
                .and_then(|span| span.value().attr("title"))
                .map(|t| t.trim().to_string());

            RawRow {
                rank: tr.select(&rank_sel).next().map(text_of),
                title: anchor.map(text_of),
                link: anchor
                    .and_then(|a| a.value().attr("href"))
                    .and_then(|href| resolve(page_url, href)),
                age,
            }
        })
        .collect();

    debug!("Parsed {} rows from {}", rows.len(), page_url);
    Ok(rows)
}

/// The element row right after a story row, unless it is another story.
fn metadata_row(story: ElementRef<'_>) -> Option<ElementRef<'_>> {
    story
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .next()
        .filter(|el| !el.value().classes().any(|c| c == "athing"))
}

fn resolve(page_url: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    match page_url.join(href) {
        Ok(u) => Some(u.to_string()),
        Err(e) => {
            warn!("Unresolvable link {:?}: {}", href, e);
            None
        }
    }
}

// ── Pagination ────────────────────────────────────────────────────────────────

/// Absolute URL of the "More" link, if the page has one.
pub fn find_more_link(html: &str, page_url: &Url) -> Option<Url> {
    let doc = Html::parse_document(html);
    let sel = Selector::parse("a.morelink").ok()?;
    let href = doc.select(&sel).next()?.value().attr("href")?;
    page_url.join(href).ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body><center><table id="hnmain"><tr><td><table>
<tr class="athing submission" id="101">
  <td class="title"><span class="rank">1.</span></td>
  <td class="votelinks"></td>
  <td class="title"><span class="titleline"><a href="https://example.com/a">First story</a><span class="sitebit comhead"> (<a href="from?site=example.com"><span class="sitestr">example.com</span></a>)</span></span></td>
</tr>
<tr><td colspan="2"></td><td class="subtext"><span class="subline"><span class="score">3 points</span> by <a class="hnuser" href="user?id=a">a</a> <span class="age" title="2024-05-01T12:34:56 1714566896"><a href="item?id=101">1 minute ago</a></span></span></td></tr>
<tr class="spacer"></tr>
<tr class="athing submission" id="100">
  <td class="title"><span class="rank">2.</span></td>
  <td class="votelinks"></td>
  <td class="title"><span class="titleline"><a href="item?id=100">Ask HN: Second</a></span></td>
</tr>
<tr><td colspan="2"></td><td class="subtext"><span class="subline">by <a class="hnuser" href="user?id=b">b</a></span></td></tr>
<tr class="spacer"></tr>
<tr class="athing submission" id="99">
  <td class="title"><span class="rank">3.</span></td>
  <td class="votelinks"></td>
  <td class="title"><span class="titleline"><a>Third</a></span></td>
</tr>
<tr class="morespace"></tr>
<tr><td colspan="2"></td><td class="title"><a href="newest?next=99&amp;n=31" class="morelink" rel="next">More</a></td></tr>
</table></td></tr></table></center></body></html>"#;

    fn page_url() -> Url {
        Url::parse("https://news.ycombinator.com/newest").unwrap()
    }

    #[test]
    fn test_parse_rows_reads_fields() {
        let rows = parse_rows(PAGE, &page_url(), 30).unwrap();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].rank.as_deref(), Some("1."));
        assert_eq!(rows[0].title.as_deref(), Some("First story"));
        assert_eq!(rows[0].link.as_deref(), Some("https://example.com/a"));
        assert_eq!(rows[0].age.as_deref(), Some("2024-05-01T12:34:56 1714566896"));

        // relative link resolved, no age span in metadata row
        assert_eq!(
            rows[1].link.as_deref(),
            Some("https://news.ycombinator.com/item?id=100")
        );
        assert_eq!(rows[1].age, None);

        // anchor without href, no metadata row at all
        assert_eq!(rows[2].title.as_deref(), Some("Third"));
        assert_eq!(rows[2].link, None);
        assert_eq!(rows[2].age, None);
    }

    #[test]
    fn test_parse_rows_respects_max_count() {
        let rows = parse_rows(PAGE, &page_url(), 2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].rank.as_deref(), Some("2."));
    }

    #[test]
    fn test_empty_listing_is_not_an_error() {
        let html = r#"<html><body><table id="hnmain"><tr><td></td></tr></table></body></html>"#;
        let rows = parse_rows(html, &page_url(), 30).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_listing_is_an_error() {
        let html = "<html><body><p>Sorry, we're not able to serve your requests.</p></body></html>";
        let err = parse_rows(html, &page_url(), 30).unwrap_err();
        assert!(matches!(err, ExtractionError::MissingListing(_)));
    }

    #[test]
    fn test_find_more_link() {
        let next = find_more_link(PAGE, &page_url()).unwrap();
        assert_eq!(
            next.as_str(),
            "https://news.ycombinator.com/newest?next=99&n=31"
        );
        assert!(find_more_link("<html></html>", &page_url()).is_none());
    }
}
