// LLM prompt constants for keyword selection and cover-letter drafting.

/// Role for keyword selection. Combined with the JSON-only instruction.
pub const KEYWORD_SELECT_ROLE: &str =
    "You are an experienced technical recruiter. You read résumés and decide \
    which single skill or qualification is the candidate's strongest selling point.";

/// Keyword selection prompt. Replace `{resume_text}` and `{columns}` before sending.
pub const KEYWORD_SELECT_PROMPT_TEMPLATE: &str = r#"Read the résumé below and choose ONE keyword for the strongest, most appealing part of it.
Then choose which columns of the job dataset should be searched for that keyword.

Guidelines:
- If the keyword is a technical skill (e.g. Python, SQL, React), choose the "skills" column.
- If the keyword is a job title or role, choose the columns that describe the role.
- Only choose from the available columns.
- Prefer a short keyword (one or two words) that is likely to appear verbatim in job listings.

Available columns:
{columns}

Return a JSON object with this EXACT schema:
{
  "keyword": "Python",
  "columns": ["skills"]
}

Résumé:
{resume_text}"#;

/// Role for cover-letter drafting. Combined with the JSON-only instruction.
pub const LETTERS_ROLE: &str =
    "You are a professional career writer. You write concise, specific, \
    personalized cover letters that connect a candidate's real experience to a job listing.";

/// Cover-letter prompt. Replace `{resume_text}` and `{jobs_json}` before sending.
pub const LETTERS_PROMPT_TEMPLATE: &str = r#"Write one personalized cover letter for EACH job listing below.

Use any information in the résumé that conveys the candidate's qualifications for the
specific listing, not only the search keyword. Address the company by name when the
listing provides it. Keep each letter under 350 words.

{grounding}

Return a JSON object with this EXACT schema (one entry per job, in the same order as the listings):
{
  "letters": [
    {
      "job_title": "Backend Engineer",
      "company": "Acme Corp",
      "body": "Dear Hiring Manager, ..."
    }
  ]
}

Résumé:
{resume_text}

Job listings (JSON records):
{jobs_json}"#;
