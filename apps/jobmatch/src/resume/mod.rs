// Résumé intake: plain-text extraction from uploaded or on-disk PDFs.

pub mod extract;
pub mod handlers;
