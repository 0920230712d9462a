//! Assistant Profile - 助手与用户的称呼

/// 助手身份信息，用于构造系统提示词
#[derive(Debug, Clone)]
pub struct AssistantProfile {
    pub username: String,
    pub assistant_name: String,
}

impl Default for AssistantProfile {
    fn default() -> Self {
        Self {
            username: "User".to_string(),
            assistant_name: "Jarvis".to_string(),
        }
    }
}

impl AssistantProfile {
    pub fn new(username: impl Into<String>, assistant_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            assistant_name: assistant_name.into(),
        }
    }

    /// 普通对话的系统提示词
    pub fn chatbot_preamble(&self) -> String {
        format!(
            "Hello, I am {}, You are a very accurate and advanced AI chatbot named {} which also has real-time up-to-date information from the internet.\n\
             *** Do not tell time until I ask, do not talk too much, just answer the question.***\n\
             *** Reply in only English, even if the question is in another language. ***\n\
             *** Do not provide notes in the output, just answer the question and never mention your training data. ***",
            self.username, self.assistant_name
        )
    }

    /// 实时搜索的系统提示词
    pub fn realtime_preamble(&self) -> String {
        format!(
            "Hello, I am {}, You are a very accurate and advanced AI chatbot named {} which has real-time up-to-date information from the internet.\n\
             *** Provide Answers In a Professional Way, make sure to add full stops, commas, question marks, and use proper grammar.***\n\
             *** Just answer the question from the provided data in a professional way. ***",
            self.username, self.assistant_name
        )
    }
}
