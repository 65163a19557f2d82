//! Closed value sets used on the wire
//!
//! Every enumeration here is also the source of the matching `enum`
//! constraint in the catalogue, so typed and untyped checks agree.

wire_enum! {
    /// Per-provider outcome. `sucess` is the published spelling and must stay.
    Status {
        Success => "sucess",
        Fail => "fail",
    }
}

wire_enum! {
    /// Polarity reported by sentiment analysis
    Sentiment {
        Positive => "Positive",
        Negative => "Negative",
        Neutral => "Neutral",
    }
}

wire_enum! {
    /// Top-level moderation category
    ModerationCategory {
        Toxic => "Toxic",
        Content => "Content",
        Sexual => "Sexual",
        Violence => "Violence",
        DrugAndAlcohol => "DrugAndAlcohol",
        Finance => "Finance",
        HateAndExtremism => "HateAndExtremism",
        Safe => "Safe",
        Other => "Other",
    }
}

wire_enum! {
    /// Fine-grained moderation label
    ModerationSubcategory {
        Insult => "Insult",
        Obscene => "Obscene",
        Derogatory => "Derogatory",
        Profanity => "Profanity",
        Threat => "Threat",
        Toxic => "Toxic",
        MiddleFinger => "MiddleFinger",
        PublicSafety => "PublicSafety",
        Health => "Health",
        Explicit => "Explicit",
        QRCode => "QRCode",
        Medical => "Medical",
        Politics => "Politics",
        Legal => "Legal",
        SexualActivity => "SexualActivity",
        SexualSituations => "SexualSituations",
        Nudity => "Nudity",
        PartialNudity => "PartialNudity",
        Suggestive => "Suggestive",
        AdultToys => "AdultToys",
        RevealingClothes => "RevealingClothes",
        Sexual => "Sexual",
        GraphicViolenceOrGore => "GraphicViolenceOrGore",
        PhysicalViolence => "PhysicalViolence",
        WeaponViolence => "WeaponViolence",
        Violence => "Violence",
        DrugProducts => "DrugProducts",
        DrugUse => "DrugUse",
        Tobacco => "Tobacco",
        Smoking => "Smoking",
        Alcohol => "Alcohol",
        Drinking => "Drinking",
        Gambling => "Gambling",
        Finance => "Finance",
        MoneyContent => "MoneyContent",
        Hate => "Hate",
        Harassment => "Harassment",
        Threatening => "Threatening",
        Extremist => "Extremist",
        Racy => "Racy",
        Safe => "Safe",
        NotSafe => "NotSafe",
        Spoofed => "Spoofed",
        Religious => "Religious",
        Offensive => "Offensive",
        Other => "Other",
    }
}

wire_enum! {
    /// Kind of personal data found by anonymization
    AnonymizationCategory {
        PersonalInformation => "PersonalInformation",
        FinancialInformation => "FinancialInformation",
        IdentificationNumbers => "IdentificationNumbers",
        Location => "Location",
        DateAndTime => "DateAndTime",
        Other => "Other",
    }
}

wire_enum! {
    /// Verdict of AI-content detection for a segment
    AiPrediction {
        AiGenerated => "ai-generated",
        Original => "original",
    }
}

wire_enum! {
    /// Speaker of a chat message
    ChatRole {
        User => "user",
        Assistant => "assistant",
        System => "system",
        Tool => "tool",
    }
}

wire_enum! {
    /// Whether the chat model may or must call tools
    ToolChoice {
        Auto => "auto",
        Required => "required",
        None => "none",
    }
}

wire_enum! {
    /// Distance used to rank semantic search results
    SimilarityMetric {
        Cosine => "cosine",
        Hamming => "hamming",
        Manhattan => "manhattan",
        Euclidean => "euclidean",
    }
}

wire_enum! {
    /// Provider a prompt is optimized for
    TargetProvider {
        OpenAi => "openai",
        Google => "google",
        Cohere => "cohere",
        Anthropic => "anthropic",
        Mistral => "mistral",
    }
}

impl Default for ToolChoice {
    fn default() -> Self {
        ToolChoice::Auto
    }
}

impl Default for SimilarityMetric {
    fn default() -> Self {
        SimilarityMetric::Cosine
    }
}

/// Roles allowed inside `previous_history` (no system/tool turns)
pub const HISTORY_ROLES: [ChatRole; 2] = [ChatRole::User, ChatRole::Assistant];
