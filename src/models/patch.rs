use crate::client::{Row, StoreError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A field of a partial update. Fields must carry `#[serde(default)]` so an
/// absent key decodes as `Missing` while an explicit `null` decodes as `Null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    #[default]
    Missing,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Patch::Null)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Write the field into an update row unless it was not supplied.
    pub fn put(&self, row: &mut Row, column: &str) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        match self {
            Patch::Missing => {}
            Patch::Null => {
                row.insert(column.to_string(), Value::Null);
            }
            Patch::Value(v) => {
                let v = serde_json::to_value(v).map_err(|e| StoreError::Decode(e.to_string()))?;
                row.insert(column.to_string(), v);
            }
        }
        Ok(())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Exemplo {
        #[serde(default)]
        nome: Patch<String>,
        #[serde(default)]
        capacidade: Patch<i32>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let p: Exemplo = serde_json::from_value(json!({"capacidade": null})).unwrap();
        assert!(p.nome.is_missing());
        assert!(p.capacidade.is_null());

        let p: Exemplo = serde_json::from_value(json!({"nome": "Ana", "capacidade": 20})).unwrap();
        assert_eq!(p.nome, Patch::Value("Ana".to_string()));
        assert_eq!(p.capacidade.value(), Some(&20));
    }

    #[test]
    fn put_skips_missing_fields() {
        let mut row = Row::new();
        Patch::<i32>::Missing.put(&mut row, "capacidade_maxima").unwrap();
        assert!(row.is_empty());
        Patch::<i32>::Null.put(&mut row, "capacidade_maxima").unwrap();
        Patch::Value("B".to_string()).put(&mut row, "turma").unwrap();
        assert_eq!(Value::Object(row), json!({"capacidade_maxima": null, "turma": "B"}));
    }
}
