use serde::{Deserialize, Serialize};

/// Wire shape of one entry in `GET /activities`, keyed by activity name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDetails {
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub participants: Vec<String>,
}

/// Body of a successful mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Body of a rejected request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailBody {
    pub detail: String,
}

/// The full `GET /activities` body: a JSON object keyed by activity name,
/// keeping catalog order on both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityCatalog(pub Vec<(String, ActivityDetails)>);

impl Serialize for ActivityCatalog {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, details)| (name, details)))
    }
}

impl<'de> Deserialize<'de> for ActivityCatalog {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> serde::de::Visitor<'de> for CatalogVisitor {
            type Value = ActivityCatalog;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("an object keyed by activity name")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut map: A,
            ) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, details)) = map.next_entry::<String, ActivityDetails>()? {
                    entries.push((name, details));
                }
                Ok(ActivityCatalog(entries))
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}
