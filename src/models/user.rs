use super::{CustomField, Group};
use crate::property::{Property, PropertyStorage};
use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::Deserialize;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// Redmineのユーザーアカウント
#[derive(Debug, Clone, Default)]
pub struct User {
    id: Option<i32>,
    storage: PropertyStorage,
    api_key: Option<String>,
    created_on: Option<DateTime<Utc>>,
    last_login_on: Option<DateTime<Utc>>,
    custom_fields: HashSet<CustomField>,
    groups: Vec<Group>,
}

impl User {
    pub const LOGIN: Property<String> = Property::new("login");
    pub const PASSWORD: Property<String> = Property::new("password");
    pub const FIRST_NAME: Property<String> = Property::new("firstname");
    pub const LAST_NAME: Property<String> = Property::new("lastname");
    pub const MAIL: Property<String> = Property::new("mail");
    pub const STATUS: Property<i32> = Property::new("status");

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn login(&self) -> Option<String> {
        self.storage.get(&Self::LOGIN)
    }

    pub fn set_login(&mut self, login: Option<String>) {
        self.storage.set(&Self::LOGIN, login);
    }

    /// パスワードはレスポンスには決して含まれない。作成・更新専用
    pub fn password(&self) -> Option<String> {
        self.storage.get(&Self::PASSWORD)
    }

    pub fn set_password(&mut self, password: Option<String>) {
        self.storage.set(&Self::PASSWORD, password);
    }

    pub fn first_name(&self) -> Option<String> {
        self.storage.get(&Self::FIRST_NAME)
    }

    pub fn set_first_name(&mut self, first_name: Option<String>) {
        self.storage.set(&Self::FIRST_NAME, first_name);
    }

    pub fn last_name(&self) -> Option<String> {
        self.storage.get(&Self::LAST_NAME)
    }

    pub fn set_last_name(&mut self, last_name: Option<String>) {
        self.storage.set(&Self::LAST_NAME, last_name);
    }

    pub fn mail(&self) -> Option<String> {
        self.storage.get(&Self::MAIL)
    }

    pub fn set_mail(&mut self, mail: Option<String>) {
        self.storage.set(&Self::MAIL, mail);
    }

    /// 1=active, 2=registered, 3=locked
    pub fn status(&self) -> Option<i32> {
        self.storage.get(&Self::STATUS)
    }

    pub fn set_status(&mut self, status: Option<i32>) {
        self.storage.set(&Self::STATUS, status);
    }

    pub fn full_name(&self) -> Option<String> {
        match (self.first_name(), self.last_name()) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(first), None) => Some(first),
            (None, Some(last)) => Some(last),
            (None, None) => None,
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn created_on(&self) -> Option<DateTime<Utc>> {
        self.created_on
    }

    pub fn last_login_on(&self) -> Option<DateTime<Utc>> {
        self.last_login_on
    }

    pub fn custom_fields(&self) -> &HashSet<CustomField> {
        &self.custom_fields
    }

    pub fn add_custom_field(&mut self, custom_field: CustomField) {
        self.custom_fields.replace(custom_field);
    }

    pub fn add_custom_fields(&mut self, custom_fields: impl IntoIterator<Item = CustomField>) {
        for field in custom_fields {
            self.add_custom_field(field);
        }
    }

    /// `Include`相当の`include=groups`付きで取得したときだけ埋まる
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn add_groups(&mut self, groups: impl IntoIterator<Item = Group>) {
        self.groups.extend(groups);
    }

    pub fn storage(&self) -> &PropertyStorage {
        &self.storage
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Deserialize)]
struct UserWire {
    id: i32,
    #[serde(default)]
    login: Option<String>,
    #[serde(default)]
    firstname: Option<String>,
    #[serde(default)]
    lastname: Option<String>,
    #[serde(default)]
    mail: Option<String>,
    #[serde(default)]
    status: Option<i32>,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    last_login_on: Option<DateTime<Utc>>,
    #[serde(default)]
    custom_fields: Vec<CustomField>,
    #[serde(default)]
    groups: Vec<Group>,
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = UserWire::deserialize(deserializer)?;
        let mut user = User::with_id(wire.id);
        if wire.login.is_some() {
            user.set_login(wire.login);
        }
        if wire.firstname.is_some() {
            user.set_first_name(wire.firstname);
        }
        if wire.lastname.is_some() {
            user.set_last_name(wire.lastname);
        }
        if wire.mail.is_some() {
            user.set_mail(wire.mail);
        }
        if wire.status.is_some() {
            user.set_status(wire.status);
        }
        user.api_key = wire.api_key;
        user.created_on = wire.created_on;
        user.last_login_on = wire.last_login_on;
        user.add_custom_fields(wire.custom_fields);
        user.add_groups(wire.groups);
        Ok(user)
    }
}
