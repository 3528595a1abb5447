//! Fixed instruction text for the summary request and the goal previews.

use crate::core::models::{ExtractedText, Goal, SummaryRequest};

pub const SYSTEM_INSTRUCTION: &str =
    "You are an assistant helping insurance agents summarize quote PDFs.";

/// Sampling temperature for every summary request.
pub const SUMMARY_TEMPERATURE: f64 = 0.4;

/// Where the extracted quote text goes in [`USER_TEMPLATE`].
pub const QUOTES_PLACEHOLDER: &str = "{quotes}";

pub const USER_TEMPLATE: &str = "
You're a commercial insurance assistant helping brokers summarize and communicate quotes to their clients.

Read the following quote(s) and prepare a professional, plain-English email summary for the insured. Your summary should:
- Highlight total premium, limits, deductibles, and carrier
- Clearly explain any major coverage differences and/or exclusions
- Flag any missing coverages or unusual endorsements
- Help the broker appear informed and helpful

Quotes:
{quotes}
";

/// Placeholder in the preview examples replaced by the entered client name.
pub const CLIENT_NAME_PLACEHOLDER: &str = "{client_name}";

/// Greeting used when no client name was entered.
pub const DEFAULT_CLIENT_NAME: &str = "there";

/// Maximum length kept from the client name field
pub const MAX_CLIENT_NAME_LEN: usize = 120;

const LOWEST_PRICE_EXAMPLE: &str = "Hi {client_name},

Thanks for the chance to shop your coverage. The most affordable option came back from Carrier A at a total annual premium of $4,850, about 12% below your current renewal.

Limits stay at $1M per occurrence / $2M aggregate with a $1,000 deductible. To reach this price the quote drops the hired and non-owned auto endorsement, so let me know if you rent vehicles for business use and I can price it back in.

Happy to walk through the details whenever works for you.";

const BEST_COVERAGE_EXAMPLE: &str = "Hi {client_name},

I've reviewed the quotes with a focus on giving you the strongest protection. Carrier B offers the broadest program at a total annual premium of $6,200.

It raises your limits to $2M per occurrence / $4M aggregate, keeps the deductible at $1,000, and adds cyber liability and equipment breakdown, both of which your current policy excludes. It also removes the professional services exclusion we discussed last year.

Let me know if you'd like to move forward or compare it side by side with your current policy.";

const BALANCED_VALUE_EXAMPLE: &str = "Hi {client_name},

Here's a quick summary of the option I think gives you the best value. Carrier C quoted a total annual premium of $5,300.

Limits are $1M per occurrence / $2M aggregate with a $2,500 deductible, and it includes hired and non-owned auto plus a basic cyber endorsement. The higher deductible keeps the premium close to the lowest quote while filling the two gaps in your current coverage.

I'm happy to adjust the deductible or limits if you'd like to see other combinations.";

/// Builds the completion request for the given quote text.
///
/// The text is inserted once, verbatim, after the `Quotes:` line.
#[must_use]
pub fn build_summary_request(text: &ExtractedText) -> SummaryRequest {
    SummaryRequest {
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        user_message: render_user_message(text.as_str()),
        temperature: SUMMARY_TEMPERATURE,
    }
}

#[must_use]
pub fn render_user_message(quotes: &str) -> String {
    // Split once instead of `replace` so text containing the placeholder is left alone.
    match USER_TEMPLATE.split_once(QUOTES_PLACEHOLDER) {
        Some((head, tail)) => {
            let mut message = String::with_capacity(USER_TEMPLATE.len() + quotes.len());
            message.push_str(head);
            message.push_str(quotes);
            message.push_str(tail);
            message
        }
        None => format!("{USER_TEMPLATE}{quotes}"),
    }
}

#[must_use]
pub fn goal_example(goal: Goal) -> &'static str {
    match goal {
        Goal::LowestPrice => LOWEST_PRICE_EXAMPLE,
        Goal::BestCoverage => BEST_COVERAGE_EXAMPLE,
        Goal::BalancedValue => BALANCED_VALUE_EXAMPLE,
    }
}

/// Example email for `goal` with the client name filled in.
#[must_use]
pub fn render_goal_preview(goal: Goal, client_name: &str) -> String {
    let name = sanitize_client_name(client_name);
    let name = if name.is_empty() {
        DEFAULT_CLIENT_NAME
    } else {
        name.as_str()
    };
    goal_example(goal).replace(CLIENT_NAME_PLACEHOLDER, name)
}

/// Remove control characters, trim and hard-truncate the client name field
pub fn sanitize_client_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control())
        .take(MAX_CLIENT_NAME_LEN)
        .collect::<String>()
        .trim()
        .to_string()
}
