use std::sync::Arc;

use serde_json::{Map, Value};

use crate::application::ports::{ChatMessage, LlmClient, LlmClientError};

const EXTRACTION_TEMPERATURE: f32 = 0.2;
const EXTRACTION_MAX_TOKENS: u32 = 512;

const FORM_EXTRACTION_PROMPT: &str = "\
你是一名精通中文的旅行表单抽取助手,需要从用户的自然语言输入中提取旅行规划所需字段。
输出要求:
1. 严格返回一个JSON对象,不要添加任何多余文字。
2. JSON键名固定为: city, start_date, end_date, travel_days, transportation, accommodation, preferences, free_text_input。
3. 日期使用YYYY-MM-DD格式; 如果无法确定,对应值设为null。
4. preferences是字符串数组,只包含与用户偏好相关的短标签,例如[\"美食\",\"亲子\",\"自然\",\"动漫\",\"购物\",\"户外\",\"历史文化\",\"夜生活\"]。
5. free_text_input用于保留预算、同行人、特殊需求等额外信息。
6. 如果用户未提及某字段,值设为null,不要编造。";

pub struct FieldExtractor<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
}

impl<L> FieldExtractor<L>
where
    L: LlmClient,
{
    pub fn new(llm_client: Arc<L>) -> Self {
        Self { llm_client }
    }

    /// Ask the model for the trip fields and parse its reply.
    ///
    /// Malformed model output degrades to an empty mapping so the
    /// missing-field check downstream reports actionable gaps; only a failed
    /// model call is an error.
    pub async fn extract(&self, transcript: &str) -> Result<Map<String, Value>, LlmClientError> {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Ok(Map::new());
        }

        let messages = [
            ChatMessage::system(FORM_EXTRACTION_PROMPT),
            ChatMessage::user(transcript),
        ];
        let response = self
            .llm_client
            .invoke(&messages, EXTRACTION_TEMPERATURE, EXTRACTION_MAX_TOKENS)
            .await?;

        tracing::debug!(chars = response.len(), "Form extraction response received");

        Ok(extract_json_object(&response))
    }
}

/// Pull the first `{` .. last `}` substring out of free-form model output and
/// parse it strictly. Anything else yields an empty mapping.
pub fn extract_json_object(text: &str) -> Map<String, Value> {
    let Some(start) = text.find('{') else {
        return Map::new();
    };
    let Some(end) = text.rfind('}') else {
        return Map::new();
    };
    if end <= start {
        return Map::new();
    }
    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
