use reqwest::Url;

/// # Errors
///
/// Will return `Err` if the value is not an absolute http(s) url
pub fn check_endpoint_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value.trim())
        .map_err(|e| format!("The api url '{value}' is not a valid url: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!(
            "The api url '{value}' must use http or https, not '{other}'."
        )),
    }
}
