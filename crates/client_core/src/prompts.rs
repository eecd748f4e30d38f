//! Instruction templates sent to the model.

pub fn five_whys_prompt(concern: &str) -> String {
    format!(
        r#"You are an expert in root cause analysis specializing in risk management. A user has provided a risk concern.
Your task is to perform a '5 Whys' analysis to uncover the fundamental root cause. The final root cause should be a process, system, or human factor that, if resolved, would prevent the problem from recurring. It must NOT be a solution or a lack of a solution.

IMPORTANT: All your output, including the 'why' questions, their answers, and the final root cause, must be written in simple, clear English, easy for anyone to understand (around an 8th-grade reading level). Avoid technical or business jargon.

User's concern: "{concern}"

Perform the analysis and return the result in the specified JSON format."#
    )
}

pub fn risk_details_prompt(root_cause: &str, original_concern: &str) -> String {
    format!(
        r#"You are an expert in risk management authoring. Based on the provided root cause and the original risk concern, generate a comprehensive risk profile. This includes a detailed risk description, a clear risk objective, and 3 to 5 high-quality risk statements.

IMPORTANT: All parts of the generated profile (description, objective, and statements) MUST be written in simple, clear English, at an 8th-grade reading level. Avoid jargon and complex sentences so that anyone can understand the risk.

Rules for risk statements:
1. Format: Each statement MUST strictly follow the 'If [cause], then [effect]' format.
2. Cause: The '[cause]' part must be a restatement of the identified root cause.
3. Effect: The '[effect]' part should describe a potential negative impact on business goals, projects, or the company (e.g., losing money, project delays, unhappy customers, bad data).
4. Focus: The statement MUST be focused on the problem (root cause), not on a solution. Do not mention the absence of a control or a solution.
5. Objectivity: Statements must be factual and objective.

Rules for Risk Description:
- Provide a simple story that explains the 'if-then' statements. Talk about the original concern and how the root cause leads to the potential bad outcomes.

Rules for Risk Objective:
- State the desired goal if this risk is successfully handled. It should be a clear, positive outcome. For example, "Make sure all customer reports are 100% correct."

Original Concern: "{original_concern}"
Identified Root Cause: "{root_cause}"

Now, generate the full risk profile and return it in the specified JSON format."#
    )
}
