use std::time::Duration;

use serde::Deserialize;

/// CORS configuration
///
/// The original deployment served a static frontend from a different
/// origin, so the defaults are permissive; production configs are expected
/// to pin `origins` to the frontend URL.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins (wildcard "*" or explicit list)
    #[serde(default)]
    pub origins: AnyOrList,
    /// Allowed HTTP methods (wildcard "*" or explicit list)
    #[serde(default)]
    pub methods: AnyOrList,
    /// Allowed headers (wildcard "*" or explicit list)
    #[serde(default)]
    pub headers: AnyOrList,
    /// Allow credentials
    #[serde(default)]
    pub credentials: bool,
    /// Max age for preflight cache in seconds
    #[serde(default)]
    pub max_age: Option<u64>,
}

impl CorsConfig {
    /// Get max age as Duration
    pub fn max_age_duration(&self) -> Option<Duration> {
        self.max_age.map(Duration::from_secs)
    }
}

/// Either a wildcard "*" or an explicit list of values
#[derive(Debug, Clone)]
pub enum AnyOrList {
    /// Match any value
    Any,
    /// Explicit list
    List(Vec<String>),
}

impl Default for AnyOrList {
    fn default() -> Self {
        Self::Any
    }
}

impl<'de> Deserialize<'de> for AnyOrList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de;

        struct AnyOrListVisitor;

        impl<'de> de::Visitor<'de> for AnyOrListVisitor {
            type Value = AnyOrList;

            fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("\"*\" or array of strings")
            }

            fn visit_str<E>(self, v: &str) -> Result<AnyOrList, E>
            where
                E: de::Error,
            {
                if v == "*" {
                    Ok(AnyOrList::Any)
                } else {
                    Ok(AnyOrList::List(vec![v.to_string()]))
                }
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<AnyOrList, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut values = Vec::new();
                while let Some(val) = seq.next_element::<String>()? {
                    if val == "*" {
                        return Ok(AnyOrList::Any);
                    }
                    values.push(val);
                }
                Ok(AnyOrList::List(values))
            }
        }

        deserializer.deserialize_any(AnyOrListVisitor)
    }
}
