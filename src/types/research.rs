use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// 单条搜索结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
}

/// 某一查询及其结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchEntry {
    pub query: String,
    pub results: Vec<SearchResult>,
}

/// 按查询组织的调研结果，保持插入顺序。
///
/// 失败的查询不会出现在其中，调用方可以通过键是否存在判断查询是否成功。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResearchInsights {
    entries: Vec<ResearchEntry>,
}

impl ResearchInsights {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入查询结果，重复查询覆盖原有结果并保留原位置
    pub fn insert(&mut self, query: impl Into<String>, results: Vec<SearchResult>) {
        let query = query.into();
        match self.entries.iter_mut().find(|entry| entry.query == query) {
            Some(entry) => entry.results = results,
            None => self.entries.push(ResearchEntry { query, results }),
        }
    }

    pub fn get(&self, query: &str) -> Option<&[SearchResult]> {
        self.entries
            .iter()
            .find(|entry| entry.query == query)
            .map(|entry| entry.results.as_slice())
    }

    pub fn contains_query(&self, query: &str) -> bool {
        self.get(query).is_some()
    }

    pub fn queries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.query.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResearchEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 所有查询的结果总数
    pub fn total_results(&self) -> usize {
        self.entries.iter().map(|entry| entry.results.len()).sum()
    }
}

// 序列化为 JSON 对象，键顺序与查询顺序一致
impl Serialize for ResearchInsights {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.query, &entry.results)?;
        }
        map.end()
    }
}
