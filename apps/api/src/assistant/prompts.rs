// All LLM prompt templates for the assistant.
// Placeholders are `{name}` and are filled in a single pass by `fill_template`, so text
// pasted by the user is never re-scanned for placeholders.

/// Replace: {job_description}
pub const JOB_ANALYSIS_PROMPT: &str = r#"Analyze the following job posting and provide a detailed breakdown.

JOB DESCRIPTION:
{job_description}

Please provide:
1. Key required skills and qualifications
2. Nice-to-have skills
3. Main responsibilities
4. Company culture indicators
5. Level of experience required
6. Key technologies or tools mentioned
7. Compensation, benefits or work-arrangement signals (remote, hybrid, on-site)
8. Potential red flags and questions worth asking the employer

Format your response in clear sections with bullet points."#;

/// Replace: {job_description}, {profile}
pub const RESUME_CUSTOMIZATION_PROMPT: &str = r#"Based on the job posting and user profile below, provide specific suggestions to customize the resume.

JOB POSTING:
{job_description}

USER PROFILE:
{profile}

Please provide:
1. Suggested changes to the professional summary
2. Skills to highlight or add
3. Experience points to emphasize
4. Keywords to include for ATS optimization
5. Sections to reorganize or prioritize
6. Gaps to address or downplay
7. Projects worth featuring for this role
8. Certifications or education details to bring forward

Make the suggestions specific and actionable."#;

/// Replace: {company_name}, {position_title}, {job_description}, {profile}
pub const COVER_LETTER_PROMPT: &str = r#"Write a professional cover letter for the following position.

Company: {company_name}
Position: {position_title}

JOB DESCRIPTION:
{job_description}

APPLICANT INFORMATION:
{profile}

The cover letter should:
1. Be professional and engaging
2. Highlight relevant experience and skills
3. Show enthusiasm for the role and company
4. Address specific job requirements
5. Be concise (3-4 paragraphs)
6. Include proper formatting with date, address, salutation, and closing

Make it personalized and compelling."#;

/// Replace: {position_title}, {job_description}, {profile}
pub const INTERVIEW_QUESTIONS_PROMPT: &str = r#"Based on this job posting and the candidate's background, generate likely interview questions.

Position: {position_title}

JOB DESCRIPTION:
{job_description}

CANDIDATE PROFILE:
{profile}

Generate 3 categories of questions:

1. TECHNICAL QUESTIONS (5-8 questions):
- Role-specific technical questions
- Problem-solving scenarios
- Tool and technology specific questions

2. BEHAVIORAL QUESTIONS (5-8 questions):
- STAR method questions
- Team collaboration scenarios
- Leadership and conflict resolution

3. PROJECT QUESTIONS (3-5 questions):
- Deep dives into the candidate's own projects and experience
- Trade-offs and decisions the candidate made
- Results and lessons learned

For each question, also provide:
- What the interviewer is looking for
- A suggested answer outline drawn from the candidate's profile

Format clearly with headers and bullet points."#;

/// Replace: {resume_text}
pub const RESUME_PARSE_PROMPT: &str = r#"Extract the applicant's details from the resume text below.

RESUME TEXT:
{resume_text}

Return a JSON object with this EXACT schema (no extra fields). Every value is a plain string;
use an empty string when the resume does not contain the information.
{
  "name": "Full name",
  "email": "Email address",
  "phone": "Phone number",
  "summary": "Professional summary or objective",
  "experience": "Work history: role, company, dates and key achievements for each position",
  "education": "Degrees, institutions and dates",
  "skills": "Technical and soft skills",
  "projects": "Notable projects with a short description each",
  "certifications": "Certifications and licenses"
}"#;

/// Fills `{key}` placeholders in one left-to-right pass. Unknown placeholders and
/// unmatched braces are copied through unchanged.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });

        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
