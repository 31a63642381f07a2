//! コンテンツの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - IndexManifest: 種別ごとの一覧（items + groups）
//! - ItemConfig: アイテムごとの config.json
//! - ContentRecord: config + Markdown本文をマージした最終出力

use crate::color::Theming;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// コンテンツ種別（ストレージのサブパスを決める）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Feelings,
    Letters,
    Memories,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [
        ContentType::Feelings,
        ContentType::Letters,
        ContentType::Memories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Feelings => "feelings",
            ContentType::Letters => "letters",
            ContentType::Memories => "memories",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown content type: {} (feelings/letters/memories)", s))
    }
}

/// 表示用の文字列フィールド（数値は文字列化、それ以外の型は無いものとする）
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_title<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

/// 配色が解釈できなければ None（一覧全体を失敗させない）
fn lenient_theming<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<Theming>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// 一覧のエントリ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    pub id: String,

    #[serde(default, deserialize_with = "lenient_title")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "lenient_theming", skip_serializing_if = "Option::is_none")]
    pub theming: Option<Theming>,
}

/// グループ（一覧のセクション見出し）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupEntry {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// index.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexManifest {
    pub items: Vec<IndexEntry>,
    pub groups: Vec<GroupEntry>,
}

impl IndexManifest {
    /// グループ順にアイテムを振り分ける
    ///
    /// 所属グループが無い、または存在しないグループを指すアイテムは含まれない
    pub fn grouped(&self) -> Vec<(&GroupEntry, Vec<&IndexEntry>)> {
        self.groups
            .iter()
            .map(|group| {
                let members = self
                    .items
                    .iter()
                    .filter(|item| item.group.as_deref() == Some(group.id.as_str()))
                    .collect();
                (group, members)
            })
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&IndexEntry> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Markdown本文を参照できるフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BodyField {
    Message,
    Verses,
    Content,
    Description,
}

impl BodyField {
    pub const ALL: [BodyField; 4] = [
        BodyField::Message,
        BodyField::Verses,
        BodyField::Content,
        BodyField::Description,
    ];

    /// config.json 上のキー
    pub fn key(&self) -> &'static str {
        match self {
            BodyField::Message => "message",
            BodyField::Verses => "verses",
            BodyField::Content => "content",
            BodyField::Description => "description",
        }
    }

    /// 取得した本文を格納するキー（例: "messageContent"）
    pub fn content_key(&self) -> &'static str {
        match self {
            BodyField::Message => "messageContent",
            BodyField::Verses => "versesContent",
            BodyField::Content => "contentContent",
            BodyField::Description => "descriptionContent",
        }
    }
}

/// Markdownファイルの拡張子
pub const MARKDOWN_EXTENSION: &str = ".md";

/// config.json
///
/// 既知のフィールドは型付き、それ以外は `extra` に保持する
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemConfig {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub verses: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient_theming", skip_serializing_if = "Option::is_none")]
    pub theming: Option<Theming>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub bible_gateway_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ItemConfig {
    pub fn field(&self, field: BodyField) -> Option<&str> {
        let value = match field {
            BodyField::Message => &self.message,
            BodyField::Verses => &self.verses,
            BodyField::Content => &self.content,
            BodyField::Description => &self.description,
        };
        value.as_deref()
    }

    /// Markdownファイルを指している場合のみファイル名を返す
    pub fn body_reference(&self, field: BodyField) -> Option<&str> {
        self.field(field)
            .filter(|value| value.ends_with(MARKDOWN_EXTENSION))
    }

    pub fn body_references(&self) -> Vec<(BodyField, &str)> {
        BodyField::ALL
            .into_iter()
            .filter_map(|field| self.body_reference(field).map(|name| (field, name)))
            .collect()
    }
}

/// config と本文をマージした表示用レコード
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRecord {
    pub id: String,
    pub config: ItemConfig,
    bodies: BTreeMap<BodyField, String>,
}

impl ContentRecord {
    pub fn new(id: impl Into<String>, config: ItemConfig, bodies: BTreeMap<BodyField, String>) -> Self {
        Self {
            id: id.into(),
            config,
            bodies,
        }
    }

    /// 取得済みの本文
    pub fn body(&self, field: BodyField) -> Option<&str> {
        self.bodies.get(&field).map(String::as_str)
    }

    pub fn has_body(&self, field: BodyField) -> bool {
        self.bodies.contains_key(&field)
    }

    pub fn title(&self) -> Option<&str> {
        self.config.title.as_deref()
    }

    pub fn theming(&self) -> Option<&Theming> {
        self.config.theming.as_ref()
    }

    /// 一覧側のタイトルで上書きする（feelings の詳細ページ用）
    ///
    /// 一覧に無い、または空のタイトルなら id を使う
    pub fn with_index_title(mut self, entries: &[IndexEntry]) -> Self {
        let title = entries
            .iter()
            .find(|entry| entry.id == self.id)
            .map(|entry| entry.title.as_str())
            .filter(|title| !title.is_empty())
            .unwrap_or(self.id.as_str())
            .to_string();
        self.config.title = Some(title);
        self
    }

    /// config のフィールド + id + `<field>Content` をひとつのJSONオブジェクトにする
    pub fn to_json(&self) -> Value {
        let mut map = match serde_json::to_value(&self.config) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        map.insert("id".to_string(), Value::String(self.id.clone()));
        for (field, text) in &self.bodies {
            map.insert(field.content_key().to_string(), Value::String(text.clone()));
        }
        Value::Object(map)
    }
}

impl Serialize for ContentRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, title: &str, group: Option<&str>) -> IndexEntry {
        IndexEntry {
            id: id.to_string(),
            title: title.to_string(),
            group: group.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_content_type_parse() {
        assert_eq!("feelings".parse::<ContentType>(), Ok(ContentType::Feelings));
        assert_eq!("memories".parse::<ContentType>(), Ok(ContentType::Memories));
        assert!("poems".parse::<ContentType>().is_err());
        assert_eq!(ContentType::Letters.to_string(), "letters");
    }

    #[test]
    fn test_manifest_without_groups() {
        let json = r#"{ "items": [ { "id": "joy", "title": "Joy", "subtitle": "bright" } ] }"#;
        let manifest: IndexManifest = serde_json::from_str(json).expect("パース失敗");

        assert_eq!(manifest.items.len(), 1);
        assert_eq!(manifest.items[0].subtitle.as_deref(), Some("bright"));
        assert!(manifest.groups.is_empty());
    }

    #[test]
    fn test_manifest_without_items() {
        let manifest: IndexManifest = serde_json::from_str("{}").expect("パース失敗");
        assert!(manifest.items.is_empty());
    }

    #[test]
    fn test_manifest_rejects_wrong_shape() {
        assert!(serde_json::from_str::<IndexManifest>("[1, 2, 3]").is_err());
        assert!(serde_json::from_str::<IndexManifest>(r#"{ "items": "joy" }"#).is_err());
    }

    #[test]
    fn test_grouped_drops_orphans() {
        let manifest = IndexManifest {
            items: vec![
                entry("joy", "Joy", Some("happy")),
                entry("fear", "Fear", Some("hard")),
                entry("peace", "Peace", Some("happy")),
                entry("lost", "Lost", Some("missing")),
                entry("loose", "Loose", None),
            ],
            groups: vec![
                GroupEntry {
                    id: "hard".to_string(),
                    title: "Hard days".to_string(),
                    description: None,
                },
                GroupEntry {
                    id: "happy".to_string(),
                    title: "Good days".to_string(),
                    description: Some("for smiling".to_string()),
                },
            ],
        };

        let grouped = manifest.grouped();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0.id, "hard");
        assert_eq!(grouped[0].1.len(), 1);
        assert_eq!(grouped[1].0.id, "happy");

        let ids: Vec<&str> = grouped[1].1.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["joy", "peace"]);

        let total: usize = grouped.iter().map(|(_, items)| items.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_item_config_known_and_extra_fields() {
        let json = r##"{
            "title": "Joy",
            "message": "message.md",
            "verses": "verses.md",
            "bibleGatewayUrl": "https://www.biblegateway.com/passage/?search=Psalm+16",
            "theming": { "backgroundColor": "#FFFBEA", "textColor": "#333333", "accentColor": "#E8A0A0" },
            "emoji": "😊",
            "order": 3
        }"##;
        let config: ItemConfig = serde_json::from_str(json).expect("パース失敗");

        assert_eq!(config.title.as_deref(), Some("Joy"));
        assert!(config.bible_gateway_url.is_some());
        assert_eq!(config.theming.as_ref().map(|t| t.text_color.as_str()), Some("#333333"));
        assert_eq!(config.extra.get("emoji"), Some(&Value::String("😊".to_string())));
        assert_eq!(config.extra.get("order"), Some(&Value::from(3)));
        assert!(!config.extra.contains_key("title"));
    }

    #[test]
    fn test_body_reference_requires_markdown() {
        let config = ItemConfig {
            message: Some("message.md".to_string()),
            content: Some("inline text".to_string()),
            description: Some("notes.txt".to_string()),
            ..Default::default()
        };

        assert_eq!(config.body_reference(BodyField::Message), Some("message.md"));
        assert_eq!(config.body_reference(BodyField::Content), None);
        assert_eq!(config.body_reference(BodyField::Description), None);
        assert_eq!(config.body_reference(BodyField::Verses), None);
        assert_eq!(config.body_references(), vec![(BodyField::Message, "message.md")]);
    }

    #[test]
    fn test_record_to_json() {
        let config = ItemConfig {
            title: Some("Joy".to_string()),
            message: Some("a.md".to_string()),
            ..Default::default()
        };
        let mut bodies = BTreeMap::new();
        bodies.insert(BodyField::Message, "# Hello".to_string());
        let record = ContentRecord::new("joy", config, bodies);

        let json = record.to_json();
        assert_eq!(json["id"], "joy");
        assert_eq!(json["title"], "Joy");
        assert_eq!(json["message"], "a.md");
        assert_eq!(json["messageContent"], "# Hello");
        assert!(json.get("versesContent").is_none());
        assert!(json.get("theming").is_none());
    }

    #[test]
    fn test_record_id_overrides_config_id() {
        let mut config = ItemConfig::default();
        config.extra.insert("id".to_string(), Value::String("other".to_string()));
        let record = ContentRecord::new("joy", config, BTreeMap::new());

        let serialized = serde_json::to_string(&record).expect("シリアライズ失敗");
        assert!(serialized.contains("\"id\":\"joy\""));
        assert!(!serialized.contains("other"));
    }

    #[test]
    fn test_with_index_title() {
        let config = ItemConfig {
            title: Some("config title".to_string()),
            ..Default::default()
        };
        let entries = vec![entry("joy", "Joy", None), entry("fear", "", None)];

        let record = ContentRecord::new("joy", config.clone(), BTreeMap::new()).with_index_title(&entries);
        assert_eq!(record.title(), Some("Joy"));

        let record = ContentRecord::new("fear", config.clone(), BTreeMap::new()).with_index_title(&entries);
        assert_eq!(record.title(), Some("fear"));

        let record = ContentRecord::new("missing", config, BTreeMap::new()).with_index_title(&entries);
        assert_eq!(record.title(), Some("missing"));
    }

    #[test]
    fn test_manifest_tolerates_partial_theming() {
        let json = r##"{ "items": [
            { "id": "joy", "title": "Joy", "theming": { "backgroundColor": "#FFFBEA" } },
            { "id": "calm", "title": "Calm", "theming": "blue" },
            { "id": "hope", "title": "Hope", "date": 2024 }
        ] }"##;
        let manifest: IndexManifest = serde_json::from_str(json).expect("パース失敗");

        assert_eq!(manifest.items.len(), 3);
        let joy = manifest.items[0].theming.as_ref().expect("配色が無い");
        assert_eq!(joy.background_color, "#FFFBEA");
        assert_eq!(joy.text_color, "");
        assert_eq!(manifest.items[1].theming, None);
        assert_eq!(manifest.items[2].date.as_deref(), Some("2024"));
    }

    #[test]
    fn test_item_config_tolerates_partial_theming() {
        let json = r##"{
            "title": "Joy",
            "message": "message.md",
            "theming": { "backgroundColor": "#FFFBEA", "accentColor": "#E8A0A0" }
        }"##;
        let config: ItemConfig = serde_json::from_str(json).expect("パース失敗");

        let theming = config.theming.as_ref().expect("配色が無い");
        assert_eq!(theming.text_color, "");
        assert_eq!(theming.to_dark().text_color, "");
        assert_eq!(config.body_reference(BodyField::Message), Some("message.md"));
    }
}
