// Record Fetcher: retrieves the XML document batch for a list of ids
// via efetch and extracts title/abstract pairs

use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use tracing::info;

use crate::error::DigestError;
use crate::models::{LiteratureRecord, NO_ABSTRACT, NO_TITLE};

pub struct RecordFetcher {
    http: Client,
    base_url: String,
}

impl RecordFetcher {
    pub fn new(http: Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Fetches all ids in one batched request. Output order follows the
    /// returned document, which the remote service controls.
    pub async fn fetch(&self, ids: &[String]) -> Result<Vec<LiteratureRecord>, DigestError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        info!(count = ids.len(), "Fetching records");

        let params = [
            ("db", "pubmed".to_string()),
            ("id", ids.join(",")),
            ("retmode", "xml".to_string()),
        ];

        let response = self
            .http
            .get(format!("{}/efetch.fcgi", self.base_url))
            .query(&params)
            .send()
            .await
            .map_err(DigestError::Network)?;

        if !response.status().is_success() {
            return Err(DigestError::Service(format!(
                "fetch endpoint returned {}",
                response.status()
            )));
        }

        let xml = response.text().await.map_err(DigestError::Network)?;
        parse_records(&xml)
    }
}

enum Field {
    Title,
    Abstract,
}

/// Walks the `<PubmedArticle>` elements of an efetch response, taking
/// the first `<ArticleTitle>` and first `<AbstractText>` per article.
/// Absent fields become the placeholder strings, so extraction never
/// fails per-record; only malformed markup is an error.
fn parse_records(xml: &str) -> Result<Vec<LiteratureRecord>, DigestError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut in_article = false;
    let mut title: Option<String> = None;
    let mut abstract_text: Option<String> = None;
    let mut capture: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"PubmedArticle" => {
                    in_article = true;
                    title = None;
                    abstract_text = None;
                }
                b"ArticleTitle" if in_article && title.is_none() => {
                    capture = Some(Field::Title);
                }
                b"AbstractText" if in_article && abstract_text.is_none() => {
                    capture = Some(Field::Abstract);
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if let Some(field) = &capture {
                    let text = e
                        .unescape()
                        .map_err(|err| DigestError::Parse(err.to_string()))?;
                    let target = match field {
                        Field::Title => &mut title,
                        Field::Abstract => &mut abstract_text,
                    };
                    target.get_or_insert_with(String::new).push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"ArticleTitle" | b"AbstractText" => capture = None,
                b"PubmedArticle" => {
                    if in_article {
                        records.push(LiteratureRecord {
                            title: title.take().unwrap_or_else(|| NO_TITLE.to_string()),
                            abstract_text: abstract_text
                                .take()
                                .unwrap_or_else(|| NO_ABSTRACT.to_string()),
                        });
                        in_article = false;
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DigestError::Parse(format!(
                    "malformed record document: {e}"
                )))
            }
            _ => {}
        }
    }

    Ok(records)
}
