use serde::Deserialize;

pub const DEFAULT_HEADSHOT_SCHEME: &str = "http:";

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Headshot {
    #[serde(default)]
    pub url: Option<String>,
}

/// A profile exactly as the endpoint returns it. Fields the API sends that we
/// do not display (ids, job titles, social links) are ignored.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub headshot: Option<Headshot>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub headshot_url: String,
}

impl Person {
    pub fn new(first_name: &str, last_name: &str, headshot_url: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            headshot_url: headshot_url.to_string(),
        }
    }

    pub fn from_record(record: PersonRecord, scheme: &str) -> Self {
        let raw_url = record
            .headshot
            .and_then(|h| h.url)
            .unwrap_or_default();
        Self {
            first_name: record.first_name,
            last_name: record.last_name,
            headshot_url: headshot_url(&raw_url, scheme),
        }
    }

    /// Row key built from the name pair. Two people with identical names share
    /// a key.
    pub fn reconciliation_key(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// headshots come back scheme relative ("//images.ctfassets.net/...")
pub fn headshot_url(raw: &str, scheme: &str) -> String {
    if raw.starts_with("//") {
        format!("{}{}", normalize_scheme(scheme), raw)
    } else {
        raw.to_string()
    }
}

pub fn normalize_scheme(scheme: &str) -> String {
    let trimmed = scheme.trim().trim_end_matches("//");
    let trimmed = trimmed.trim_end_matches(':');
    if trimmed.is_empty() {
        DEFAULT_HEADSHOT_SCHEME.to_string()
    } else {
        format!("{}:", trimmed.to_ascii_lowercase())
    }
}

pub fn people_from_records(records: Vec<PersonRecord>, scheme: &str) -> Vec<Person> {
    records
        .into_iter()
        .map(|r| Person::from_record(r, scheme))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_relative_url_gets_scheme() {
        assert_eq!(
            headshot_url("//images.example.com/a.jpg", "http:"),
            "http://images.example.com/a.jpg"
        );
        assert_eq!(
            headshot_url("//images.example.com/a.jpg", "https"),
            "https://images.example.com/a.jpg"
        );
    }

    #[test]
    fn other_urls_are_kept_as_is() {
        assert_eq!(
            headshot_url("https://cdn.example.com/b.png", "http:"),
            "https://cdn.example.com/b.png"
        );
        assert_eq!(headshot_url("not a url", "http:"), "not a url");
        assert_eq!(headshot_url("", "http:"), "");
    }

    #[test]
    fn malformed_urls_keep_their_whitespace() {
        assert_eq!(headshot_url("  //img/a.jpg", "http:"), "  //img/a.jpg");
        assert_eq!(headshot_url("//img/a.jpg ", "http:"), "http://img/a.jpg ");
        assert_eq!(headshot_url(" ", "http:"), " ");
    }

    #[test]
    fn scheme_normalization() {
        assert_eq!(normalize_scheme("HTTPS://"), "https:");
        assert_eq!(normalize_scheme("http"), "http:");
        assert_eq!(normalize_scheme("  "), "http:");
    }

    #[test]
    fn record_decodes_from_api_shape() {
        let body = r#"[
            {"id": "1", "firstName": "Viju", "lastName": "Legard",
             "jobTitle": "Engineer", "headshot": {"url": "//img/viju.jpg", "width": 340}},
            {"firstName": "Matt", "lastName": "Seibert", "headshot": {}},
            {"firstName": "Nina", "lastName": "Park"}
        ]"#;
        let records: Vec<PersonRecord> = serde_json::from_str(body).unwrap();
        let people = people_from_records(records, DEFAULT_HEADSHOT_SCHEME);
        assert_eq!(
            people,
            vec![
                Person::new("Viju", "Legard", "http://img/viju.jpg"),
                Person::new("Matt", "Seibert", ""),
                Person::new("Nina", "Park", ""),
            ]
        );
    }

    #[test]
    fn reconciliation_key_is_name_pair() {
        let a = Person::new("Amy", "Zane", "x");
        let b = Person::new("Amy", "Zane", "y");
        assert_eq!(a.reconciliation_key(), "Amy Zane");
        assert_eq!(a.reconciliation_key(), b.reconciliation_key());
    }
}
