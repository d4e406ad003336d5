use paper_core::{JudgeRequest, PaperBrief};

pub const SYSTEM_PROMPT: &str = "You are a senior epidemiology journal editor. \
Return JSON only with keys: winner (paperA|paperB|tie), rationale (string).";

fn describe(brief: &PaperBrief) -> String {
    format!(
        "{} | {} | {} | advisor={:.1} | reviewer={:.1}",
        brief.title, brief.track, brief.method, brief.advisor_score, brief.reviewer_score
    )
}

/// Build the comparison prompt, presenting `request.a` as Paper A.
pub fn user_prompt(request: &JudgeRequest) -> String {
    format!(
        "Compare two papers and select the stronger one for publication quality.\n\n\
         Paper A: {}\n\
         Paper B: {}\n\
         Prioritize identification, robustness, and policy significance.",
        describe(&request.a),
        describe(&request.b)
    )
}
