use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::hash::{Hash, Hasher};

/// エンティティに付与されたカスタムフィールドの値
///
/// 同じIDのフィールドを2つ持つことはできないため、等価性とハッシュは
/// IDのみで決まる。複数値フィールド（multiple: true）は`values`側に入る。
#[derive(Debug, Clone, Serialize)]
pub struct CustomField {
    pub id: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    pub multiple: bool,
}

impl CustomField {
    pub fn new(id: i32, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            value: Some(value.into()),
            values: Vec::new(),
            multiple: false,
        }
    }

    /// 複数値フィールド用のコンストラクタ
    pub fn with_values(id: i32, name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            value: None,
            values,
            multiple: true,
        }
    }
}

impl PartialEq for CustomField {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CustomField {}

impl Hash for CustomField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ワイヤー上の"value"は文字列・数値・配列のいずれでも返りうる
#[derive(Deserialize)]
struct CustomFieldWire {
    id: i32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    multiple: Option<bool>,
}

impl<'de> Deserialize<'de> for CustomField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = CustomFieldWire::deserialize(deserializer)?;
        let mut field = CustomField {
            id: wire.id,
            name: wire.name,
            value: None,
            values: Vec::new(),
            multiple: wire.multiple.unwrap_or(false),
        };
        match wire.value {
            Some(Value::Array(items)) => {
                field.multiple = true;
                field.values = items.into_iter().map(scalar_to_string).collect();
            }
            Some(Value::Null) | None => {}
            Some(scalar) => field.value = Some(scalar_to_string(scalar)),
        }
        Ok(field)
    }
}

fn scalar_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// カスタムフィールドの定義（GET /custom_fields.json）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomFieldDefinition {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customized_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regexp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_filter: bool,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default)]
    pub multiple: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub possible_values: Vec<PossibleValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PossibleValue {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}
