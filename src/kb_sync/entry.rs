use serde_json::Value;

/// One knowledge base configuration entry, classified when the parameter is
/// parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestionEntry {
    /// Bare knowledge base id string. Never started: a data source id is
    /// required to target a sync.
    Legacy { knowledge_base_id: String },
    /// `{"knowledgeBaseId": ..., "dataSourceId": ...}`
    Pair {
        knowledge_base_id: String,
        data_source_id: String,
    },
    /// Any other shape. Keeps the knowledge base id when one was readable.
    Invalid { knowledge_base_id: Option<String> },
}

impl IngestionEntry {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(id) => IngestionEntry::Legacy {
                knowledge_base_id: id.clone(),
            },
            Value::Object(map) => {
                let kb = map.get("knowledgeBaseId").and_then(Value::as_str);
                let ds = map.get("dataSourceId").and_then(Value::as_str);
                match (kb, ds) {
                    (Some(kb), Some(ds)) => IngestionEntry::Pair {
                        knowledge_base_id: kb.to_string(),
                        data_source_id: ds.to_string(),
                    },
                    (kb, _) => IngestionEntry::Invalid {
                        knowledge_base_id: kb.map(str::to_string),
                    },
                }
            }
            _ => IngestionEntry::Invalid {
                knowledge_base_id: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_string_is_legacy() {
        assert_eq!(
            IngestionEntry::from_value(&json!("kb-1")),
            IngestionEntry::Legacy {
                knowledge_base_id: "kb-1".into(),
            }
        );
    }

    #[test]
    fn object_with_both_ids_is_pair() {
        let entry = IngestionEntry::from_value(
            &json!({"knowledgeBaseId": "kb-2", "dataSourceId": "ds-1"}),
        );
        assert_eq!(
            entry,
            IngestionEntry::Pair {
                knowledge_base_id: "kb-2".into(),
                data_source_id: "ds-1".into(),
            }
        );
    }

    #[test]
    fn object_without_data_source_is_invalid() {
        let entry = IngestionEntry::from_value(&json!({"knowledgeBaseId": "kb-3"}));
        assert_eq!(
            entry,
            IngestionEntry::Invalid {
                knowledge_base_id: Some("kb-3".into()),
            }
        );
    }

    #[test]
    fn other_shapes_are_invalid() {
        for value in [
            json!(42),
            json!(null),
            json!(["kb"]),
            json!({"dataSourceId": "ds"}),
        ] {
            assert_eq!(
                IngestionEntry::from_value(&value),
                IngestionEntry::Invalid {
                    knowledge_base_id: None,
                },
                "value: {value}"
            );
        }
    }
}
