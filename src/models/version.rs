use super::{CustomField, NamedId};
use crate::property::{Property, PropertyStorage};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::Deserializer;
use serde::Deserialize;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// プロジェクトのバージョン（ターゲットバージョン）
///
/// 部分更新に使うフィールドはPropertyStorage経由で持つ。セッターを
/// 呼んだフィールドだけがJSONに出力される。
#[derive(Debug, Clone, Default)]
pub struct Version {
    id: Option<i32>,
    storage: PropertyStorage,
    project: Option<NamedId>,
    created_on: Option<DateTime<Utc>>,
    updated_on: Option<DateTime<Utc>>,
    custom_fields: HashSet<CustomField>,
}

impl Version {
    pub const NAME: Property<String> = Property::new("name");
    pub const DESCRIPTION: Property<String> = Property::new("description");
    pub const STATUS: Property<String> = Property::new("status");
    pub const SHARING: Property<String> = Property::new("sharing");
    pub const DUE_DATE: Property<NaiveDate> = Property::new("due_date");

    /// 未保存の新しいバージョン（IDなし）
    pub fn new() -> Self {
        Self::default()
    }

    /// サーバー上の既存バージョンを指すインスタンス
    pub fn with_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn name(&self) -> Option<String> {
        self.storage.get(&Self::NAME)
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.storage.set(&Self::NAME, name);
    }

    pub fn description(&self) -> Option<String> {
        self.storage.get(&Self::DESCRIPTION)
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.storage.set(&Self::DESCRIPTION, description);
    }

    /// open / locked / closed のいずれか
    pub fn status(&self) -> Option<String> {
        self.storage.get(&Self::STATUS)
    }

    pub fn set_status(&mut self, status: Option<String>) {
        self.storage.set(&Self::STATUS, status);
    }

    /// none / descendants / hierarchy / tree / system のいずれか
    pub fn sharing(&self) -> Option<String> {
        self.storage.get(&Self::SHARING)
    }

    pub fn set_sharing(&mut self, sharing: Option<String>) {
        self.storage.set(&Self::SHARING, sharing);
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.storage.get(&Self::DUE_DATE)
    }

    pub fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.storage.set(&Self::DUE_DATE, due_date);
    }

    pub fn project(&self) -> Option<&NamedId> {
        self.project.as_ref()
    }

    pub fn set_project(&mut self, project: NamedId) {
        self.project = Some(project);
    }

    pub fn created_on(&self) -> Option<DateTime<Utc>> {
        self.created_on
    }

    pub fn updated_on(&self) -> Option<DateTime<Utc>> {
        self.updated_on
    }

    /// 読み取り専用ビュー。追加は`add_custom_field`経由で行う
    pub fn custom_fields(&self) -> &HashSet<CustomField> {
        &self.custom_fields
    }

    /// 同じIDのフィールドが既にあれば新しい値で置き換える
    pub fn add_custom_field(&mut self, custom_field: CustomField) {
        self.custom_fields.replace(custom_field);
    }

    pub fn add_custom_fields(&mut self, custom_fields: impl IntoIterator<Item = CustomField>) {
        for field in custom_fields {
            self.add_custom_field(field);
        }
    }

    pub fn storage(&self) -> &PropertyStorage {
        &self.storage
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Deserialize)]
struct VersionWire {
    id: i32,
    #[serde(default)]
    project: Option<NamedId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    sharing: Option<String>,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_on: Option<DateTime<Utc>>,
    #[serde(default)]
    custom_fields: Vec<CustomField>,
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = VersionWire::deserialize(deserializer)?;
        let mut version = Version::with_id(wire.id);
        // レスポンスに現れたフィールドだけを設定済みにする
        if wire.name.is_some() {
            version.set_name(wire.name);
        }
        if wire.description.is_some() {
            version.set_description(wire.description);
        }
        if wire.status.is_some() {
            version.set_status(wire.status);
        }
        if wire.sharing.is_some() {
            version.set_sharing(wire.sharing);
        }
        if wire.due_date.is_some() {
            version.set_due_date(wire.due_date);
        }
        if let Some(project) = wire.project {
            version.set_project(project);
        }
        version.created_on = wire.created_on;
        version.updated_on = wire.updated_on;
        version.add_custom_fields(wire.custom_fields);
        Ok(version)
    }
}
