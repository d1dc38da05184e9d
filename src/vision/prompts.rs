//! Prompt templates for the three vision-model calls.
//!
//! Every prompt demands a strict JSON object so responses can be
//! schema-validated instead of scraped out of free text.

/// System prompt for search-keyword generation.
pub const KEYWORD_SYSTEM_PROMPT: &str = "\
You generate search keywords for a JAN code (GTIN-13) product database. \
Extract the product's distinguishing features (brand, maker, product line, \
model number) from the image and the given product name, and turn them into \
concise, distinct search terms. Return at most 5 keywords, most useful \
first, as a JSON object: {\"keywords\": [\"...\"]}. Return nothing else.";

/// System prompt for re-ranking lookup candidates against the image.
pub const FILTER_SYSTEM_PROMPT: &str = "\
You pick the JAN code (GTIN-13) candidates that best match a product image \
and product name. Judge the candidates' item names, brands, and makers \
against what is visible in the image. Return the matching code numbers in \
descending order of plausibility, plus your confidence in the top pick as a \
number between 0 and 1, as a JSON object: \
{\"jancodes\": [\"4901234567894\"], \"confidence\": 0.8}. Only use code \
numbers from the provided candidate list. Return nothing else.";

/// System prompt for direct JAN-code estimation from the image alone.
pub const ESTIMATE_SYSTEM_PROMPT: &str = "\
You identify JAN codes (GTIN-13) from product images. A JAN code is a \
13-digit number usually printed under the barcode on the packaging; \
Japanese codes typically start with 45 or 49. If you can read or confidently \
infer codes, return up to 5 of them, most likely first, as a JSON object: \
{\"jancodes\": [\"4901234567894\"]}. If you cannot, return \
{\"jancodes\": []}. Return nothing else.";

/// User-message text for keyword generation.
pub fn keyword_user_text(product_name: &str) -> String {
    format!(
        "Generate search keywords for the product \"{product_name}\" shown in this image."
    )
}

/// User-message text for candidate filtering. `candidates_json` is the
/// serialized pool.
pub fn filter_user_text(product_name: &str, candidates_json: &str) -> String {
    format!(
        "Pick the code numbers that best match the product \"{product_name}\" \
         in this image, from these candidates:\n\n{candidates_json}"
    )
}

/// User-message text for direct estimation.
pub fn estimate_user_text(product_name: &str) -> String {
    format!("Identify the JAN code (GTIN-13) of the product \"{product_name}\" in this image.")
}
