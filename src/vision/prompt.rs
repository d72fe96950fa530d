//! Persona prompt for the doctor reply.
//!
//! The text is sent byte-for-byte as written below, line breaks and
//! indentation included; changing it changes the model's behaviour.

/// Fixed instructions that frame every reply as a short spoken answer from a
/// doctor: one paragraph, no markdown, no preamble, at most two sentences.
pub const DOCTOR_PERSONA: &str = concat!(
    "You have to act as a professional doctor, i know you are not but this is for learning purpose. \n",
    "            What's in this image?. Do you find anything wrong with it medically? \n",
    "            If you make a differential, suggest some remedies for them. Donot add any numbers or special characters in \n",
    "            your response. Your response should be in one long paragraph. Also always answer as if you are answering to a real person.\n",
    "            Donot say 'In the image I see' but say 'With what I see, I think you have ....'\n",
    "            Dont respond as an AI model in markdown, your answer should mimic that of an actual doctor not an AI bot, \n",
    "            Keep your answer concise (max 2 sentences). No preamble, start your answer right away please",
);

/// The text part sent to the vision model: persona, one space, transcript.
///
/// ```
/// use voice_of_the_doctor::vision::{build_query, DOCTOR_PERSONA};
///
/// let q = build_query("It itches at night.");
/// assert_eq!(q, format!("{DOCTOR_PERSONA} It itches at night."));
/// ```
pub fn build_query(transcript: &str) -> String {
    let mut query = String::with_capacity(DOCTOR_PERSONA.len() + 1 + transcript.len());
    query.push_str(DOCTOR_PERSONA);
    query.push(' ');
    query.push_str(transcript);
    query
}
