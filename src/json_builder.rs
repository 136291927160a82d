use crate::models::{CustomField, Group, Issue, IssueRelation, User, Version};
use crate::property::PropertyStorage;
use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// Beanの1種類分をJSONオブジェクトに書き出す関数
pub type Writer<B> = fn(&mut Map<String, Value>, &B);

/// BeanをRedmineのエンベロープ付きJSONにする（例: `{"issue": {...}}`）
///
/// 出力されるのは、PropertyStorageで明示的に設定されたエントリ
/// （明示的なnullを含む）と、値の入ったプレーンフィールドだけ。
/// 一度も設定されていないフィールドはキーごと省略される。
pub fn to_json_value<B>(envelope: &str, bean: &B, writer: Writer<B>) -> Value {
    let mut object = Map::new();
    writer(&mut object, bean);
    let mut root = Map::new();
    root.insert(envelope.to_string(), Value::Object(object));
    Value::Object(root)
}

pub fn to_simple_json<B>(envelope: &str, bean: &B, writer: Writer<B>) -> String {
    to_json_value(envelope, bean, writer).to_string()
}

pub fn write_issue(out: &mut Map<String, Value>, issue: &Issue) {
    copy_storage(out, issue.storage());
    if let Some(project) = issue.project() {
        out.insert("project_id".to_string(), json!(project.id));
    }
    if let Some(tracker) = issue.tracker() {
        out.insert("tracker_id".to_string(), json!(tracker.id));
    }
    if let Some(status_id) = issue.status_id() {
        out.insert("status_id".to_string(), json!(status_id));
    }
    if let Some(priority_id) = issue.priority_id() {
        out.insert("priority_id".to_string(), json!(priority_id));
    }
    if let Some(assignee_id) = issue.assignee_id() {
        out.insert("assigned_to_id".to_string(), json!(assignee_id));
    }
    if let Some(category) = issue.category() {
        out.insert("category_id".to_string(), json!(category.id));
    }
    if let Some(version_id) = issue.target_version().and_then(Version::id) {
        out.insert("fixed_version_id".to_string(), json!(version_id));
    }
    if let Some(description) = issue.description() {
        out.insert("description".to_string(), json!(description));
    }
    if issue.is_private() {
        out.insert("is_private".to_string(), json!(true));
    }
    if !issue.watchers().is_empty() {
        let ids: Vec<i32> = issue.watchers().iter().map(|w| w.id).collect();
        out.insert("watcher_user_ids".to_string(), json!(ids));
    }
    write_custom_fields(out, issue.custom_fields());
}

pub fn write_version(out: &mut Map<String, Value>, version: &Version) {
    copy_storage(out, version.storage());
    if let Some(project) = version.project() {
        out.insert("project_id".to_string(), json!(project.id));
    }
    write_custom_fields(out, version.custom_fields());
}

pub fn write_user(out: &mut Map<String, Value>, user: &User) {
    copy_storage(out, user.storage());
    write_custom_fields(out, user.custom_fields());
}

pub fn write_group(out: &mut Map<String, Value>, group: &Group) {
    copy_storage(out, group.storage());
}

pub fn write_relation(out: &mut Map<String, Value>, relation: &IssueRelation) {
    if let Some(issue_to_id) = relation.issue_to_id {
        out.insert("issue_to_id".to_string(), json!(issue_to_id));
    }
    out.insert(
        "relation_type".to_string(),
        json!(relation.relation_type),
    );
    if let Some(delay) = relation.delay {
        out.insert("delay".to_string(), json!(delay));
    }
}

// 明示的に設定されたストレージエントリだけをそのまま写す。
// Value::Nullは明示的なnullとしてそのまま出力される。
fn copy_storage(out: &mut Map<String, Value>, storage: &PropertyStorage) {
    for (key, value) in storage.entries() {
        out.insert(key.to_string(), value.clone());
    }
}

// カスタムフィールドは配列ではなく {"<id>": value} のマップで送る
fn write_custom_fields(out: &mut Map<String, Value>, custom_fields: &HashSet<CustomField>) {
    if custom_fields.is_empty() {
        return;
    }
    let mut values = Map::new();
    for field in custom_fields {
        let value = if field.multiple {
            json!(field.values)
        } else {
            match &field.value {
                Some(v) => json!(v),
                None => Value::Null,
            }
        };
        values.insert(field.id.to_string(), value);
    }
    out.insert("custom_field_values".to_string(), Value::Object(values));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_id_is_added_to_json_if_provided() {
        let mut issue = Issue::new();
        issue.set_priority_id(Some(1));

        let generated = to_simple_json("issue", &issue, write_issue);

        assert!(generated.contains("\"priority_id\":1"));
    }

    #[test]
    fn test_custom_fields_are_written_to_version_if_provided() {
        let mut version = Version::with_id(1);
        version.add_custom_field(CustomField::new(2, "myName", "myValue"));

        let generated = to_simple_json("version", &version, write_version);

        assert!(generated.contains("\"custom_field_values\":{\"2\":\"myValue\"}"));
    }

    #[test]
    fn test_only_explicitly_set_fields_are_added_to_issue_json() {
        let mut issue = Issue::new();
        issue.set_subject(Some("subj1".to_string()));
        issue.set_done_ratio(None);

        let generated = to_simple_json("issue", &issue, write_issue);

        assert!(generated.contains("\"subject\":\"subj1\""));
        // 明示的なnullはキー付きで出力される
        assert!(generated.contains("\"done_ratio\":null"));
        // 一度も設定していないフィールドは現れない
        assert!(!generated.contains("start_date"));
        assert!(!generated.contains("estimated_hours"));
    }

    #[test]
    fn test_only_explicitly_set_fields_are_added_to_user_json() {
        let mut user = User::new();
        user.set_login(Some("login1".to_string()));
        user.set_mail(None);
        user.set_status(None);

        let generated = to_simple_json("user", &user, write_user);

        assert!(generated.contains("\"login\":\"login1\""));
        assert!(generated.contains("\"mail\":null"));
        assert!(generated.contains("\"status\":null"));
        assert!(!generated.contains("\"id\""));
    }

    #[test]
    fn test_only_explicitly_set_fields_are_added_to_group_json() {
        let group_without_name = Group::with_id(4);
        let generated = to_simple_json("group", &group_without_name, write_group);
        assert!(!generated.contains("\"name\""));

        let mut group_with_name = Group::with_id(4);
        group_with_name.set_name(Some("some name".to_string()));
        let generated = to_simple_json("group", &group_with_name, write_group);
        assert!(generated.contains("\"name\":\"some name\""));
    }

    #[test]
    fn test_envelope_wraps_the_object() {
        let mut issue = Issue::new();
        issue.set_subject(Some("subj1".to_string()));

        let value = to_json_value("issue", &issue, write_issue);

        assert_eq!(value["issue"]["subject"], "subj1");
        assert!(value["issue"].get("done_ratio").is_none());
    }

    #[test]
    fn test_plain_fields_are_written_from_references() {
        use crate::models::{Project, Tracker};

        let mut issue = Issue::new();
        issue.set_subject(Some("subj1".to_string()));
        issue.set_project(Project::new(1, "Sandbox"));
        issue.set_tracker(Tracker::new(2, "Feature"));
        issue.set_assignee_id(Some(3));
        let mut target = Version::with_id(8);
        target.set_name(Some("0.8".to_string()));
        issue.set_target_version(target);

        let value = to_json_value("issue", &issue, write_issue);

        assert_eq!(value["issue"]["project_id"], 1);
        assert_eq!(value["issue"]["tracker_id"], 2);
        assert_eq!(value["issue"]["assigned_to_id"], 3);
        assert_eq!(value["issue"]["fixed_version_id"], 8);
    }

    #[test]
    fn test_multi_value_custom_field_serializes_as_array() {
        let mut issue = Issue::new();
        issue.add_custom_field(CustomField::with_values(
            5,
            "Tags",
            vec!["backend".to_string(), "urgent".to_string()],
        ));

        let value = to_json_value("issue", &issue, write_issue);

        assert_eq!(
            value["issue"]["custom_field_values"]["5"],
            json!(["backend", "urgent"])
        );
    }

    #[test]
    fn test_watcher_ids_are_written_when_present() {
        use crate::models::Watcher;

        let mut issue = Issue::new();
        issue.add_watchers([
            Watcher {
                id: 3,
                name: None,
            },
            Watcher {
                id: 5,
                name: None,
            },
        ]);

        let value = to_json_value("issue", &issue, write_issue);

        assert_eq!(value["issue"]["watcher_user_ids"], json!([3, 5]));
    }

    #[test]
    fn test_relation_json() {
        let mut relation = IssueRelation::new(11, "precedes");
        relation.delay = Some(5);

        let value = to_json_value("relation", &relation, write_relation);

        assert_eq!(value["relation"]["issue_to_id"], 11);
        assert_eq!(value["relation"]["relation_type"], "precedes");
        assert_eq!(value["relation"]["delay"], 5);
    }
}
