use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// Beanの1フィールドを識別する型付きキー
///
/// 名前はそのままRedmineのワイヤーキー（snake_case）として使われる。
/// 各Bean型の`const`として宣言して使う:
///
/// ```
/// use redmine_api::Property;
///
/// const DONE_RATIO: Property<i32> = Property::new("done_ratio");
/// ```
pub struct Property<T> {
    name: &'static str,
    _value_type: PhantomData<fn() -> T>,
}

impl<T> Property<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _value_type: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property").field("name", &self.name).finish()
    }
}

/// フィールドの値と「明示的に設定されたか」を同時に記録するストア
///
/// RedmineのAPIは部分更新で「フィールドを省略する」と「nullを送る」を
/// 区別するため、値そのものとは別に設定済みマーカーが必要になる。
/// キーがマップに存在すること自体が「明示的に設定された」印で、
/// `Value::Null`は「明示的なnull」を表す。
///
/// 一度も`set`されていないキーはJSON出力に現れてはならない。
/// `Clone`は値とマーカーの両方を保存するディープコピー。
#[derive(Debug, Clone, Default)]
pub struct PropertyStorage {
    values: HashMap<&'static str, Value>,
}

impl PropertyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 値を記録し、キーを設定済みとしてマークする
    ///
    /// `None`を渡した場合も設定済みになる（明示的なnull）。
    /// JSONで表現できない値はプログラミングエラーなので即座にパニックする。
    pub fn set<T: Serialize>(&mut self, property: &Property<T>, value: Option<T>) {
        let value = match value {
            Some(v) => {
                serde_json::to_value(v).expect("property values must be representable as JSON")
            }
            None => Value::Null,
        };
        self.values.insert(property.name, value);
    }

    /// 保存された値を返す。未設定または明示的なnullの場合は`None`
    pub fn get<T: DeserializeOwned>(&self, property: &Property<T>) -> Option<T> {
        match self.values.get(property.name) {
            None | Some(Value::Null) => None,
            Some(value) => serde_json::from_value(value.clone()).ok(),
        }
    }

    /// そのキーに対して一度でも`set`が呼ばれたかどうか
    pub fn is_set<T>(&self, property: &Property<T>) -> bool {
        self.values.contains_key(property.name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 明示的に設定されたエントリを（ワイヤーキー, 値）で列挙する
    ///
    /// JSONビルダーはここに現れたものだけを出力する。
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }
}
