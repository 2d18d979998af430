//! Prompt composition for the ATS analysis call.
//!
//! Both pieces are pure functions of their inputs. The system instruction is
//! fixed; the user message embeds the two documents verbatim under labeled
//! delimiters so the model can tell them apart unambiguously.

use crate::report::AnalysisRequest;

/// Fixed system instruction establishing the analyst persona, the three
/// evaluation axes, the 0-100 scoring range, and the schema-conformance
/// requirement.
pub const SYSTEM_INSTRUCTION: &str = "You are a world-class Applicant Tracking System (ATS) analyst with 20 years of \
experience. Your task is to evaluate a candidate's resume against a specific job \
description. Analyze the documents across three core areas: Keyword Match, \
Content Impact (quantifiable achievements, action verbs), and Formatting/Structure \
(ATS parsability, standard headings). Generate a compatibility score from 0 to 100 \
and provide detailed, actionable feedback. Ensure all feedback is professional and \
constructive. The output MUST adhere strictly to the provided JSON schema.";

/// Compose the user message for one analysis request.
///
/// The resume appears first under `RESUME TEXT:`, the job description second
/// under `JOB DESCRIPTION:`; both are embedded verbatim. Callers must ensure
/// neither input is empty.
pub fn user_message(request: &AnalysisRequest) -> String {
    format!(
        "Analyze the following RESUME against the JOB DESCRIPTION.\n\n\
         ---\n\
         RESUME TEXT:\n\
         {}\n\
         ---\n\
         JOB DESCRIPTION:\n\
         {}\n",
        request.resume_text, request.jd_text
    )
}
