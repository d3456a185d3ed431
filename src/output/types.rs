use serde::Serialize;

#[derive(Serialize, Clone, Debug)]
pub struct Studio {
    pub name: &'static str,
    pub url: &'static str,
}

pub fn studio() -> Studio {
    Studio { name: "JustForFans", url: "https://justfor.fans" }
}

#[derive(Serialize, Clone, Debug)]
pub struct Tag {
    pub name: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct ScenePerformer {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Host scene shape. Absent fields are omitted, never null.
#[derive(Serialize, Debug)]
pub struct SceneResult {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub studio: Studio,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub performers: Vec<ScenePerformer>,
}

/// Host gallery shape; `urls` is the ordered photo list of the post.
#[derive(Serialize, Debug)]
pub struct GalleryResult {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub studio: Studio,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub performers: Vec<ScenePerformer>,
}

#[derive(Serialize, Debug)]
pub struct PerformerResult {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// Search candidate for performer-by-name.
#[derive(Serialize, Debug)]
pub struct PerformerRef {
    pub name: String,
    pub url: String,
}
