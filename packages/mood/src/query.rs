//! Query string carried by the history route: `?name=..&age=..`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Identity;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
}

impl HistoryQuery {
    /// Parse a query string, with or without the leading `?`.
    ///
    /// Like `URLSearchParams.get`, the first value of a repeated key wins and
    /// unknown keys are ignored.
    pub fn parse(query: &str) -> Self {
        let mut name = None;
        let mut age = None;
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "name" if name.is_none() => name = Some(value.into_owned()),
                "age" if age.is_none() => age = Some(value.into_owned()),
                _ => {}
            }
        }
        Self {
            name: name.unwrap_or_default(),
            age: age.unwrap_or_default(),
        }
    }

    /// Query text for a router that percent-decodes the whole query once
    /// before handing it back: the encoded form, encoded again.
    pub fn to_route_query(&self) -> String {
        form_urlencoded::byte_serialize(self.to_string().as_bytes()).collect()
    }

    /// Inverse of [`to_route_query`](Self::to_route_query) after the router's
    /// own decoding pass.
    pub fn from_route_query(decoded: &str) -> Self {
        Self::parse(decoded)
    }

    /// The identity when both fields are present.
    pub fn identity(&self) -> Option<Identity> {
        let identity = Identity::new(&self.name, &self.age);
        (!identity.is_incomplete()).then_some(identity)
    }
}

impl From<Identity> for HistoryQuery {
    fn from(identity: Identity) -> Self {
        Self {
            name: identity.name,
            age: identity.age,
        }
    }
}

/// Renders the URL-encoded form without the leading `?`.
impl fmt::Display for HistoryQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = serde_urlencoded::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_and_decodes_awkward_names() {
        let query = HistoryQuery::from(Identity::new("Zoë & Ana=1?", "42"));
        let text = query.to_string();
        assert!(!text.contains(' '));
        assert!(text.contains("%26"));
        assert_eq!(HistoryQuery::parse(&text), query);
        assert_eq!(HistoryQuery::parse(&format!("?{text}")), query);
    }

    #[test]
    fn test_identity_requires_both_fields() {
        assert_eq!(
            HistoryQuery::parse("name=Ada&age=36").identity(),
            Some(Identity::new("Ada", "36"))
        );
        assert_eq!(HistoryQuery::parse("name=Ada").identity(), None);
        assert_eq!(HistoryQuery::parse("age=36&name=").identity(), None);
        assert_eq!(HistoryQuery::parse("").identity(), None);
    }

    #[test]
    fn test_repeated_keys_take_first_value() {
        let query = HistoryQuery::parse("name=Ada&age=36&name=Grace&extra=1");
        assert_eq!(query.identity(), Some(Identity::new("Ada", "36")));
    }

    #[test]
    fn test_route_query_survives_one_decoding_pass() {
        let query = HistoryQuery::from(Identity::new("Zoë & Ana=1?%+b", "36"));
        let route = query.to_route_query();
        assert!(!route.contains('&'));
        assert!(!route.contains('='));

        let decoded = urlencoding::decode(&route).unwrap();
        assert_eq!(HistoryQuery::from_route_query(&decoded), query);
    }

    #[test]
    fn test_plus_decodes_to_space() {
        assert_eq!(HistoryQuery::parse("name=Ada+L&age=36").name, "Ada L");
    }
}
