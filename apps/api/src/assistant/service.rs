//! Prompt-templating service: builds prompts from plain data and forwards them to the
//! text generator.
//!
//! Remote failures never escape these functions. The four writing operations return a
//! tagged [`GenerationOutcome`]; `parse_resume` returns a [`GenerationFailure`] only when
//! the remote call itself fails and degrades to a fallback record on a malformed reply.

use tracing::{error, info, warn};

use crate::assistant::outcome::{GenerationFailure, GenerationOutcome};
use crate::assistant::prompts::{
    fill_template, COVER_LETTER_PROMPT, INTERVIEW_QUESTIONS_PROMPT, JOB_ANALYSIS_PROMPT,
    RESUME_CUSTOMIZATION_PROMPT, RESUME_PARSE_PROMPT,
};
use crate::assistant::resume_parser::{humanize_key, interpret_resume_reply, ResumeParse};
use crate::llm_client::prompts::{CAREER_COACH_SYSTEM, JSON_ONLY_SYSTEM};
use crate::llm_client::TextGenerator;
use crate::models::content::ContentType;
use crate::models::profile::ProfileFields;

pub async fn analyze_job_posting(llm: &dyn TextGenerator, description: &str) -> GenerationOutcome {
    let prompt = fill_template(JOB_ANALYSIS_PROMPT, &[("job_description", description)]);
    generate_text(llm, ContentType::JobAnalysis, &prompt).await
}

pub async fn customize_resume(
    llm: &dyn TextGenerator,
    description: &str,
    profile: &ProfileFields,
) -> GenerationOutcome {
    let profile_block = render_profile(profile);
    let prompt = fill_template(
        RESUME_CUSTOMIZATION_PROMPT,
        &[("job_description", description), ("profile", profile_block.as_str())],
    );
    generate_text(llm, ContentType::ResumeCustomization, &prompt).await
}

pub async fn generate_cover_letter(
    llm: &dyn TextGenerator,
    description: &str,
    profile: &ProfileFields,
    company_name: &str,
    position_title: &str,
) -> GenerationOutcome {
    let profile_block = render_profile(profile);
    let prompt = fill_template(
        COVER_LETTER_PROMPT,
        &[
            ("company_name", or_unspecified(company_name)),
            ("position_title", or_unspecified(position_title)),
            ("job_description", description),
            ("profile", profile_block.as_str()),
        ],
    );
    generate_text(llm, ContentType::CoverLetter, &prompt).await
}

/// A blank profile still yields questions; its fields render as "Not provided".
pub async fn generate_interview_questions(
    llm: &dyn TextGenerator,
    description: &str,
    profile: &ProfileFields,
    position_title: &str,
) -> GenerationOutcome {
    let profile_block = render_profile(profile);
    let prompt = fill_template(
        INTERVIEW_QUESTIONS_PROMPT,
        &[
            ("position_title", or_unspecified(position_title)),
            ("job_description", description),
            ("profile", profile_block.as_str()),
        ],
    );
    generate_text(llm, ContentType::InterviewQuestions, &prompt).await
}

/// Asks the model for a fixed-schema JSON record and flattens it into profile fields.
pub async fn parse_resume(
    llm: &dyn TextGenerator,
    raw_text: &str,
) -> Result<ResumeParse, GenerationFailure> {
    let prompt = fill_template(RESUME_PARSE_PROMPT, &[("resume_text", raw_text)]);

    let reply = llm.generate(&prompt, JSON_ONLY_SYSTEM).await.map_err(|e| {
        error!("Error parsing resume: {e}");
        GenerationFailure::from_llm("parsing resume", &e)
    })?;

    let parse = interpret_resume_reply(&reply);
    if parse.used_fallback {
        warn!(
            "Resume parse reply was not a JSON object ({} chars); using summary fallback",
            reply.chars().count()
        );
    } else {
        info!("Resume parsed into structured profile fields");
    }
    Ok(parse)
}

async fn generate_text(
    llm: &dyn TextGenerator,
    content_type: ContentType,
    prompt: &str,
) -> GenerationOutcome {
    let (action, empty_message) = failure_wording(content_type);

    match llm.generate(prompt, CAREER_COACH_SYSTEM).await {
        Ok(text) if !text.trim().is_empty() => {
            info!(
                "Generated {} ({} chars)",
                content_type.as_str(),
                text.chars().count()
            );
            GenerationOutcome::Ok {
                content: text.trim().to_string(),
            }
        }
        Ok(_) => {
            warn!("Model returned no text for {}", content_type.as_str());
            GenerationFailure::empty(empty_message).into()
        }
        Err(e) => {
            error!("Error {action}: {e}");
            GenerationFailure::from_llm(action, &e).into()
        }
    }
}

fn failure_wording(content_type: ContentType) -> (&'static str, &'static str) {
    match content_type {
        ContentType::JobAnalysis => ("analyzing job posting", "Analysis failed"),
        ContentType::ResumeCustomization => {
            ("customizing resume", "Resume customization failed")
        }
        ContentType::CoverLetter => ("generating cover letter", "Cover letter generation failed"),
        ContentType::InterviewQuestions => (
            "generating interview questions",
            "Interview questions generation failed",
        ),
    }
}

/// Profile as a labelled text block for interpolation into prompts.
pub fn render_profile(profile: &ProfileFields) -> String {
    profile
        .entries()
        .iter()
        .map(|(key, value)| {
            let value = or_not_provided(value.trim());
            if value.contains('\n') {
                format!("{}:\n{}", humanize_key(key), value)
            } else {
                format!("{}: {}", humanize_key(key), value)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn or_not_provided(value: &str) -> &str {
    if value.is_empty() {
        "Not provided"
    } else {
        value
    }
}

fn or_unspecified(value: &str) -> &str {
    if value.trim().is_empty() {
        "Not specified"
    } else {
        value.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::outcome::FailureKind;
    use crate::test_support::StubGenerator;

    const GO_POSTING: &str =
        "Senior Go Engineer, 5 years experience, Kubernetes, distributed systems";

    fn full_profile() -> ProfileFields {
        ProfileFields {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            summary: "Backend engineer".to_string(),
            experience: "Acme, Senior Engineer, 2020-2024".to_string(),
            education: "BSc Computer Science".to_string(),
            skills: "Go, Rust, Kubernetes".to_string(),
            projects: "Raft-based key-value store".to_string(),
            certifications: "CKA".to_string(),
        }
    }

    #[tokio::test]
    async fn test_analyze_embeds_description_verbatim() {
        let llm = StubGenerator::replying("1. Key required skills: Go, Kubernetes");

        let outcome = analyze_job_posting(&llm, GO_POSTING).await;

        assert_eq!(
            outcome.content(),
            Some("1. Key required skills: Go, Kubernetes")
        );
        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(GO_POSTING));
    }

    #[tokio::test]
    async fn test_analysis_end_to_end_yields_clean_text() {
        let llm = StubGenerator::replying(
            "## Key required skills\n- Go\n- Kubernetes\n- Distributed systems\n## Experience\n- 5+ years",
        );

        let outcome = analyze_job_posting(&llm, GO_POSTING).await;

        let content = outcome.content().expect("analysis should succeed");
        assert!(!content.is_empty());
        assert!(!content.contains("Traceback"));
        assert!(!content.contains("panicked"));
    }

    #[tokio::test]
    async fn test_empty_reply_becomes_empty_response_error() {
        let llm = StubGenerator::replying("   ");

        let outcome = analyze_job_posting(&llm, GO_POSTING).await;

        assert_eq!(
            outcome,
            GenerationOutcome::Error {
                kind: FailureKind::EmptyResponse,
                message: "Analysis failed".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_remote_failure_is_returned_as_error_outcome() {
        let llm = StubGenerator::failing(529, "Overloaded");

        let outcome = analyze_job_posting(&llm, GO_POSTING).await;

        match outcome {
            GenerationOutcome::Error { kind, message } => {
                assert_eq!(kind, FailureKind::Api);
                assert!(message.starts_with("Error analyzing job posting:"));
                assert!(message.contains("Overloaded"));
            }
            other => panic!("expected error outcome, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_customize_resume_interpolates_every_profile_field() {
        let llm = StubGenerator::replying("Emphasize Kubernetes work");
        let profile = full_profile();

        let outcome = customize_resume(&llm, GO_POSTING, &profile).await;

        assert!(outcome.content().is_some());
        let prompt = &llm.prompts()[0];
        for (_, value) in profile.entries() {
            assert!(prompt.contains(value), "prompt is missing {value:?}");
        }
        assert!(prompt.contains(GO_POSTING));
    }

    #[tokio::test]
    async fn test_cover_letter_includes_company_and_title() {
        let llm = StubGenerator::replying("Dear Hiring Manager, ...");

        let outcome =
            generate_cover_letter(&llm, GO_POSTING, &full_profile(), "Globex", "Staff Engineer")
                .await;

        assert!(outcome.content().is_some());
        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Company: Globex"));
        assert!(prompt.contains("Position: Staff Engineer"));
        assert!(prompt.contains("Email: jane@example.com"));
    }

    #[tokio::test]
    async fn test_cover_letter_failure_uses_cover_letter_wording() {
        let llm = StubGenerator::replying("");

        let outcome = generate_cover_letter(&llm, GO_POSTING, &full_profile(), "", "").await;

        assert_eq!(
            outcome,
            GenerationOutcome::Error {
                kind: FailureKind::EmptyResponse,
                message: "Cover letter generation failed".to_string(),
            }
        );
        assert!(llm.prompts()[0].contains("Company: Not specified"));
    }

    #[tokio::test]
    async fn test_interview_questions_prompt_uses_profile() {
        let llm = StubGenerator::replying("TECHNICAL QUESTIONS\n1. Explain Raft");

        let outcome =
            generate_interview_questions(&llm, GO_POSTING, &full_profile(), "Staff Engineer").await;

        assert!(outcome.content().is_some());
        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Raft-based key-value store"));
        assert!(prompt.contains("PROJECT QUESTIONS"));
    }

    #[tokio::test]
    async fn test_interview_questions_name_the_position() {
        let llm = StubGenerator::replying("TECHNICAL QUESTIONS\n1. Explain Raft");

        generate_interview_questions(&llm, GO_POSTING, &full_profile(), "Staff Engineer").await;
        generate_interview_questions(&llm, GO_POSTING, &full_profile(), "  ").await;

        let prompts = llm.prompts();
        assert!(prompts[0].contains("Position: Staff Engineer\n"));
        assert!(prompts[1].contains("Position: Not specified\n"));
    }

    #[tokio::test]
    async fn test_interview_questions_work_without_profile() {
        let llm = StubGenerator::replying("BEHAVIORAL QUESTIONS\n1. Tell me about a conflict");

        let outcome = generate_interview_questions(
            &llm,
            "We build distributed systems",
            &ProfileFields::default(),
            "Backend Engineer",
        )
        .await;

        assert!(outcome.content().is_some());
        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Name: Not provided"));
        assert!(prompt.contains("We build distributed systems"));
    }

    #[tokio::test]
    async fn test_parse_resume_flattens_structured_reply() {
        let llm = StubGenerator::replying(
            r#"{"name": "Jane Doe", "skills": ["Go", "Rust"], "education": {"degree": "BSc"}}"#,
        );

        let parse = parse_resume(&llm, "Jane Doe\nGo, Rust").await.unwrap();

        assert!(!parse.used_fallback);
        assert_eq!(parse.fields.name, "Jane Doe");
        assert_eq!(parse.fields.skills, "Go, Rust");
        assert_eq!(parse.fields.education, "Degree: BSc");
        assert!(llm.prompts()[0].contains("Jane Doe\nGo, Rust"));
    }

    #[tokio::test]
    async fn test_parse_resume_remote_failure_is_reported() {
        let llm = StubGenerator::failing(401, "invalid x-api-key");

        let failure = parse_resume(&llm, "Jane Doe").await.unwrap_err();

        assert_eq!(failure.kind, FailureKind::Api);
        assert!(failure.message.starts_with("Error parsing resume:"));
    }

    #[test]
    fn test_render_profile_marks_missing_fields() {
        let profile = ProfileFields {
            name: "Jane Doe".to_string(),
            experience: "Acme\nInitech".to_string(),
            ..Default::default()
        };
        let block = render_profile(&profile);
        assert!(block.starts_with("Name: Jane Doe\n"));
        assert!(block.contains("Email: Not provided"));
        assert!(block.contains("Experience:\nAcme\nInitech"));
    }
}
