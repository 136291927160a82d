use std::fmt;

/// Issue取得時に関連コレクションの展開を要求するフラグ
///
/// 指定しなかったコレクションは空のまま返る。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Include {
    Journals,
    Relations,
    Attachments,
    Changesets,
    Watchers,
    Children,
}

impl Include {
    pub fn as_str(&self) -> &'static str {
        match self {
            Include::Journals => "journals",
            Include::Relations => "relations",
            Include::Attachments => "attachments",
            Include::Changesets => "changesets",
            Include::Watchers => "watchers",
            Include::Children => "children",
        }
    }
}

impl fmt::Display for Include {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue一覧取得のフィルタとページング（GET /issues.json）
#[derive(Debug, Clone, Default)]
pub struct IssueListParams {
    pub project_id: Option<i32>,
    pub tracker_id: Option<i32>,
    /// ステータスIDまたは open / closed / *
    pub status_id: Option<String>,
    /// ユーザーIDまたは me
    pub assigned_to_id: Option<String>,
    /// 部分一致は `~` 前置（例: `~crash`）
    pub subject: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
}

impl IssueListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project_id(mut self, project_id: i32) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn tracker_id(mut self, tracker_id: i32) -> Self {
        self.tracker_id = Some(tracker_id);
        self
    }

    pub fn status_id(mut self, status_id: impl Into<String>) -> Self {
        self.status_id = Some(status_id.into());
        self
    }

    pub fn assigned_to_id(mut self, assigned_to_id: impl Into<String>) -> Self {
        self.assigned_to_id = Some(assigned_to_id.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// クエリ文字列を組み立てる。先頭の`?`は含まない
    pub fn to_query(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();
        if let Some(project_id) = self.project_id {
            pairs.push(format!("project_id={}", project_id));
        }
        if let Some(tracker_id) = self.tracker_id {
            pairs.push(format!("tracker_id={}", tracker_id));
        }
        if let Some(status_id) = &self.status_id {
            pairs.push(format!("status_id={}", urlencoding::encode(status_id)));
        }
        if let Some(assigned_to_id) = &self.assigned_to_id {
            pairs.push(format!(
                "assigned_to_id={}",
                urlencoding::encode(assigned_to_id)
            ));
        }
        if let Some(subject) = &self.subject {
            pairs.push(format!("subject={}", urlencoding::encode(subject)));
        }
        if let Some(offset) = self.offset {
            pairs.push(format!("offset={}", offset));
        }
        if let Some(limit) = self.limit {
            pairs.push(format!("limit={}", limit));
        }
        if let Some(sort) = &self.sort {
            pairs.push(format!("sort={}", urlencoding::encode(sort)));
        }
        pairs.join("&")
    }
}

/// ページングされた一覧レスポンスの1ページ分
#[derive(Debug, Clone)]
pub struct ResultsPage<T> {
    pub items: Vec<T>,
    pub total_count: u32,
    pub offset: u32,
    pub limit: u32,
}

impl<T> ResultsPage<T> {
    /// このページの後ろにまだ結果が残っているか
    pub fn has_next_page(&self) -> bool {
        (self.offset + self.items.len() as u32) < self.total_count
    }
}
