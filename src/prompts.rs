//! Prompt templates for the five analysis modes.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — changing what a report asks for (a new
//!    section, a different scale) requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect composed prompts directly
//!    without a live model, making template regressions easy to catch.
//!
//! The section headings, score ranges, and category enumerations below are
//! load-bearing: [`crate::pipeline::score`] scans the model's reply for
//! lines like `Overall Match Score: NN%`, so the ATS template must keep
//! requesting that exact shape.
//!
//! Composition is pure string formatting. Input texts are substituted
//! verbatim with no conditional logic inside a template.

/// HR-style evaluation of one resume against a job description.
pub fn hr_evaluation(resume: &str, job_description: &str) -> String {
    format!(
        r#"You are an experienced HR professional with 15+ years of experience in recruitment and talent acquisition.
Analyze the following resume against the job description and provide a comprehensive HR evaluation.

**Job Description:**
{job_description}

**Resume:**
{resume}

Provide a detailed HR evaluation report with the following sections:

## Overall Impression
A brief summary of the candidate's profile and initial impression.

## Core Strengths
List 4-6 key strengths that make this candidate stand out. Be specific.

## Technical & Professional Alignment
Evaluate how well the candidate's technical skills and experience align with the job requirements.
Rate alignment on a scale of 1-10 and explain your rating.

## Gap Analysis
Identify any missing skills, experiences, or qualifications that the job requires.
Categorize gaps as: Critical, Important, or Nice-to-have.

## Communication & Presentation Quality
Evaluate the resume's formatting, clarity, grammar, and overall presentation.
Rate on a scale of 1-10 and provide specific feedback.

## Final Recommendation
Provide a clear hiring recommendation: Highly Recommended, Recommended, Consider with Reservations, or Not Recommended.
Include a brief justification for your recommendation.

Be honest, constructive, and professional in your evaluation."#
    )
}

/// Personalized skill-gap report with a learning roadmap.
pub fn skill_enhancement(resume: &str, job_description: &str) -> String {
    format!(
        r#"You are a career development coach and skills mentor specializing in helping professionals advance their careers.
Analyze the following resume and job description to provide personalized skill enhancement recommendations.

**Job Description:**
{job_description}

**Resume:**
{resume}

Provide a comprehensive skill enhancement plan with the following sections:

## Skill Gap Analysis
Identify specific skills mentioned in the job description that are missing or weak in the resume.
Categorize them as: Technical Skills, Soft Skills, Tools/Technologies, Certifications.

## Learning Roadmap

### Short-term (1-3 months)
List 3-5 immediate skills to focus on with specific learning resources:
- Online courses and free resources
- Estimated time commitment

### Long-term (3-12 months)
List 3-5 advanced skills for career growth with learning paths:
- Advanced courses, certification programs, books

## Recommended Certifications
Suggest 3-5 relevant certifications that would strengthen the profile, with issuing
organization, relevance to the job, and approximate cost and time.

## Practical Project Ideas
Suggest 3-5 hands-on projects to build these skills, each with a description,
the skills it demonstrates, an estimated timeline, and its portfolio value.

## Career Growth Tips
Provide 3-5 actionable tips for professional development beyond technical skills:
networking, industry involvement, personal branding, continuous learning habits.

Be specific, practical, and encouraging in your recommendations."#
    )
}

/// ATS compatibility analysis with a numeric match score.
///
/// The score lines requested here (`Overall Match Score: NN%` and the four
/// component percentages) feed the gauge and bar displays downstream.
pub fn ats_match(resume: &str, job_description: &str) -> String {
    format!(
        r#"You are an ATS (Applicant Tracking System) expert and recruitment technology specialist.
Analyze the following resume against the job description to determine ATS compatibility and match percentage.

**Job Description:**
{job_description}

**Resume:**
{resume}

Provide a detailed ATS compatibility analysis with the following sections:

## Overall Match Score
Provide a percentage score (0-100%) on a line formatted exactly as "Overall Match Score: NN%".
Break down the score into these components:
- Keyword Match: X%
- Skills Match: X%
- Experience Match: X%
- Education Match: X%

## Keyword Analysis

### Matched Keywords
List 10-15 important keywords from the job description that appear in the resume.
Format: keyword (frequency in resume)

### Missing Keywords
List 10-15 critical keywords from the job description that are missing from the resume.
Categorize as: Critical, Important, or Optional.

## Skills Assessment

### Present Skills
List technical and soft skills that match the job requirements.

### Missing Skills
List skills mentioned in the job description but not found in the resume.

## Experience Alignment
Evaluate how well the candidate's experience matches the job requirements:
- Years of experience: Match/Gap
- Relevant roles: Match/Gap
- Industry experience: Match/Gap
- Key responsibilities: Match/Gap

## Education & Certifications
Evaluate educational qualifications:
- Degree requirements: Met/Not Met
- Relevant certifications: Present/Missing
- Additional qualifications: List any

## ATS Optimization Tips
Provide 5-7 specific, actionable recommendations to improve ATS compatibility:
keyword optimization, formatting, section organization, content enhancements.

## Competitive Analysis
Rate the resume's competitiveness for this role: Highly Competitive, Competitive, Moderately Competitive, or Needs Improvement.
Provide reasoning for the rating.

Be precise with percentages and specific with recommendations."#
    )
}

/// Side-by-side comparison of two resumes against one job description.
pub fn comparison(resume_a: &str, resume_b: &str, job_description: &str) -> String {
    format!(
        r#"You are a senior recruitment consultant specializing in candidate evaluation and comparison.
Compare the following two resumes against the job description and provide a detailed analysis.

**Job Description:**
{job_description}

**Resume 1:**
{resume_a}

**Resume 2:**
{resume_b}

Provide a comprehensive comparison report with the following sections:

## Quick Comparison Summary
A brief overview comparing both candidates.

## Match Score Comparison
Compare ATS match scores:
- Resume 1: X%
- Resume 2: X%

## Strengths Comparison

### Resume 1 Strengths
List 4-6 key strengths of candidate 1.

### Resume 2 Strengths
List 4-6 key strengths of candidate 2.

## Weaknesses Comparison

### Resume 1 Weaknesses
List 3-5 areas where candidate 1 falls short.

### Resume 2 Weaknesses
List 3-5 areas where candidate 2 falls short.

## Key Differentiators
Identify 3-5 major differences between the candidates: technical skills,
experience level, education, achievements, presentation quality.

## Category-wise Comparison
Compare candidates across key dimensions (rate each 1-10):

| Category | Resume 1 | Resume 2 | Winner |
|----------|----------|----------|--------|
| Technical Skills | X/10 | X/10 | Resume X |
| Experience Relevance | X/10 | X/10 | Resume X |
| Education | X/10 | X/10 | Resume X |
| Achievements | X/10 | X/10 | Resume X |
| Presentation | X/10 | X/10 | Resume X |

## Final Recommendation
Clearly state which resume is better suited for this role and why.
Provide a confidence level: Very Confident, Confident, or Moderately Confident.

## Additional Notes
Any other observations or considerations for the hiring decision.

Be objective, fair, and thorough in your comparison."#
    )
}

/// Standing system instruction for the chat assistant when a resume and
/// job description are loaded. The caller appends the conversation
/// transcript and the live user question before sending.
pub fn chat_system(resume: &str, job_description: &str) -> String {
    format!(
        r#"You are an expert career advisor and resume consultant with deep knowledge of recruitment, ATS systems, and career development.

You have access to the following information:

**Job Description:**
{job_description}

**Resume:**
{resume}

Your role is to:
1. Answer questions about the resume and how it relates to the job description
2. Provide personalized career advice and suggestions
3. Help optimize the resume for better ATS compatibility
4. Suggest improvements for specific sections
5. Explain gaps or weaknesses and how to address them
6. Recommend skills to learn or certifications to pursue
7. Provide interview preparation tips based on the resume and job

Guidelines:
- Be conversational, friendly, and encouraging
- Provide specific, actionable advice
- Reference specific parts of the resume when relevant
- Be honest about weaknesses but constructive in feedback
- Keep responses concise but comprehensive (2-4 paragraphs typically)
- Use bullet points for lists to improve readability
- If asked about something not in the resume or job description, provide general career advice

Always aim to help the user improve their chances of landing the job."#
    )
}

/// Fallback chat instruction used when no resume or job description is
/// loaded.
pub const CHAT_GENERIC: &str = "You are a helpful career advisor and resume expert. \
Provide general advice about resumes, job applications, career development, and interview preparation. \
Be friendly, encouraging, and provide actionable tips.";

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe — Rust engineer, 6 years.";
    const JOB: &str = "Senior Rust engineer, distributed systems.";

    #[test]
    fn hr_embeds_inputs_and_sections() {
        let p = hr_evaluation(RESUME, JOB);
        assert!(p.contains(RESUME));
        assert!(p.contains(JOB));
        for section in [
            "## Overall Impression",
            "## Core Strengths",
            "## Technical & Professional Alignment",
            "## Gap Analysis",
            "## Final Recommendation",
        ] {
            assert!(p.contains(section), "missing {section}");
        }
        assert!(p.contains("Consider with Reservations"));
    }

    #[test]
    fn skill_enhancement_has_roadmap_horizons() {
        let p = skill_enhancement(RESUME, JOB);
        assert!(p.contains("Short-term (1-3 months)"));
        assert!(p.contains("Long-term (3-12 months)"));
        assert!(p.contains("## Recommended Certifications"));
    }

    #[test]
    fn ats_requests_scannable_score_lines() {
        let p = ats_match(RESUME, JOB);
        assert!(p.contains("Overall Match Score: NN%"));
        for component in [
            "Keyword Match: X%",
            "Skills Match: X%",
            "Experience Match: X%",
            "Education Match: X%",
        ] {
            assert!(p.contains(component), "missing {component}");
        }
        assert!(p.contains("Moderately Competitive"));
    }

    #[test]
    fn comparison_embeds_both_resumes_and_confidence_scale() {
        let other = "John Smith — Go developer, 4 years.";
        let p = comparison(RESUME, other, JOB);
        assert!(p.contains(RESUME));
        assert!(p.contains(other));
        assert!(p.contains("| Category | Resume 1 | Resume 2 | Winner |"));
        assert!(p.contains("Moderately Confident"));
    }

    #[test]
    fn chat_system_establishes_persona() {
        let p = chat_system(RESUME, JOB);
        assert!(p.contains("career advisor"));
        assert!(p.contains(RESUME));
        assert!(p.contains("2-4 paragraphs"));
    }

    #[test]
    fn composition_is_deterministic() {
        assert_eq!(ats_match(RESUME, JOB), ats_match(RESUME, JOB));
        assert_eq!(
            comparison(RESUME, RESUME, JOB),
            comparison(RESUME, RESUME, JOB)
        );
    }
}
