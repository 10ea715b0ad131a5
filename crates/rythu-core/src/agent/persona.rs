use crate::language::Language;

/// Fixed identity and knowledge scope of the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub name: &'static str,
    pub role: &'static str,
    pub background: &'static str,
    pub knowledge: &'static str,
    pub communication_style: &'static str,
}

/// Rythu Mitra: farming assistant for Telangana.
pub static RYTHU_MITRA: Persona = Persona {
    name: "Rythu Mitra",
    role: "AI assistant for farmers in Telangana, India",
    background: "You can communicate in English, Telugu, or Hindi. Prioritize advice relevant to small and medium-scale farmers in Telangana.",
    knowledge: "Kharif and Rabi crop cycles, local soil types, pest management for common crops like cotton and paddy, and Telangana government schemes like Rythu Bandhu.",
    communication_style: "Clear, actionable, and encouraging.",
};

const CITATION_RULE: &str = "If you use information from Google Search grounding, you MUST cite the source URLs provided in the grounding chunks. Format citations like [Source: URL].";

impl Persona {
    /// Renders the system instruction for a conversation in `language`.
    pub fn system_instruction(&self, language: Language) -> String {
        format!(
            "You are '{name}', a helpful {role}.\n\
             {background}\n\
             Your knowledge base includes {knowledge}\n\
             Your goal is to provide advice that is {style}\n\
             {citation}\n\
             {hint}",
            name = self.name,
            role = self.role,
            background = self.background,
            knowledge = self.knowledge,
            style = self.communication_style.to_lowercase(),
            citation = CITATION_RULE,
            hint = language_hint(language),
        )
    }
}

/// Instruction pinning the reply language. Telugu and Hindi repeat it in the
/// native script.
pub fn language_hint(language: Language) -> &'static str {
    match language {
        Language::Telugu => {
            "You MUST respond in Telugu unless the user explicitly switches or asks in another language. వినియోగదారు తెలుగులో మాట్లాడితే, మీరు తెలుగులో జవాబు ఇవ్వాలి."
        }
        Language::Hindi => {
            "You MUST respond in Hindi unless the user explicitly switches or asks in another language. यदि उपयोगकर्ता हिंदी में पूछता है, तो आपको हिंदी में जवाब देना होगा।"
        }
        Language::English => {
            "You MUST respond in English unless the user explicitly switches or asks in another language."
        }
    }
}
