//! Fixed summary templates and custom-instruction presets

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Template name recorded when no fixed template applies.
pub const CUSTOM_TEMPLATE_NAME: &str = "Custom";

/// Key that explicitly selects the custom prompt.
pub const CUSTOM_TEMPLATE_KEY: &str = "custom";

/// Instruction used by the outer surfaces when the user gives none.
pub const DEFAULT_INSTRUCTIONS: &str = "Create a concise summary with key points, decisions made, and action items. Format as bullet points for easy reading.";

/// A named, fixed instruction body used to steer summary generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SummaryTemplate {
    /// Discussion points, decisions, action items and next steps
    Standard,
    /// Strategic outcomes and stakeholder commitments
    Executive,
    /// Technical decisions, development items and blockers
    Technical,
}

impl SummaryTemplate {
    pub const ALL: [SummaryTemplate; 3] = [Self::Standard, Self::Executive, Self::Technical];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Executive => "executive",
            Self::Technical => "technical",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Standard => "Standard Meeting",
            Self::Executive => "Executive Summary",
            Self::Technical => "Technical Meeting",
        }
    }

    pub fn prompt_body(&self) -> &'static str {
        match self {
            Self::Standard => STANDARD_PROMPT,
            Self::Executive => EXECUTIVE_PROMPT,
            Self::Technical => TECHNICAL_PROMPT,
        }
    }

    /// Exact key lookup. `"custom"` and anything unknown yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "standard" => Some(Self::Standard),
            "executive" => Some(Self::Executive),
            "technical" => Some(Self::Technical),
            _ => None,
        }
    }
}

/// Template-or-custom resolution for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateChoice {
    Template(SummaryTemplate),
    Custom,
}

impl TemplateChoice {
    /// Resolve an optional request key. Unknown keys fall back to `Custom`.
    pub fn from_key(key: Option<&str>) -> Self {
        match key {
            Some(CUSTOM_TEMPLATE_KEY) | None => Self::Custom,
            Some(key) => SummaryTemplate::from_key(key).map_or(Self::Custom, Self::Template),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Template(template) => template.display_name(),
            Self::Custom => CUSTOM_TEMPLATE_NAME,
        }
    }
}

/// Canned custom instructions offered alongside the free-text prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InstructionPreset {
    /// Key decisions, action items and next steps as bullets
    Executive,
    /// Action items, decisions and follow-ups with owners and deadlines
    ActionItems,
    /// Technical discussion, proposed solutions and architecture changes
    Technical,
    /// Formal minutes: attendees, agenda, decisions, action items
    Minutes,
}

impl InstructionPreset {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Executive => "Executive Summary",
            Self::ActionItems => "Action Items",
            Self::Technical => "Technical Summary",
            Self::Minutes => "Meeting Minutes",
        }
    }

    pub fn instructions(&self) -> &'static str {
        match self {
            Self::Executive => "Create a concise executive summary with key decisions, action items, and next steps. Format as bullet points for easy reading.",
            Self::ActionItems => "Extract all action items, decisions made, and follow-up tasks. Include responsible parties and deadlines where mentioned.",
            Self::Technical => "Focus on technical discussions, solutions proposed, and implementation details. Include any technical decisions or architecture changes.",
            Self::Minutes => "Create formal meeting minutes with attendees, agenda items discussed, decisions made, and action items. Use a professional format.",
        }
    }
}

const STANDARD_PROMPT: &str = "Analyze this meeting transcript and create a comprehensive summary with the following structure:

**Key Discussion Points:**
- Main topics discussed
- Important insights shared

**Decisions Made:**
- Clear decisions reached
- Rationale behind decisions

**Action Items:**
- Specific tasks assigned
- Responsible parties
- Deadlines mentioned

**Next Steps:**
- Follow-up actions required
- Future meeting plans

Format the response with clear bullet points and maintain a professional tone.";

const EXECUTIVE_PROMPT: &str = "Create an executive-level summary focusing on:

**Strategic Outcomes:**
- High-level decisions made
- Business impact and implications

**Key Stakeholder Commitments:**
- Leadership decisions
- Resource allocations
- Strategic direction changes

**Critical Action Items:**
- Priority initiatives
- Executive-level follow-ups
- Timeline for major deliverables

Keep the summary concise and focused on strategic value and business impact.";

const TECHNICAL_PROMPT: &str = "Summarize this technical meeting with focus on:

**Technical Decisions:**
- Architecture choices made
- Technology selections
- Implementation approaches

**Development Items:**
- Code reviews discussed
- Technical debt identified
- Performance considerations

**Action Items:**
- Development tasks assigned
- Technical research needed
- Code changes required

**Blockers & Dependencies:**
- Technical challenges identified
- External dependencies
- Resource requirements

Use technical terminology appropriately and focus on implementation details.";
