/// Renders the landing page. `base_url` is shown in the path-embedded example
/// and must end with `/`.
pub fn render(base_url: &str) -> String {
    let base = html_escape::encode_text(base_url);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>PDF to Text Converter</title>
    <style>
      body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; line-height: 1.6; color: #333; }}
      h1 {{ color: #0070f3; text-align: center; }}
      section {{ background: #f6f6f6; border-radius: 8px; padding: 1.25rem 1.5rem; margin: 1.5rem 0; }}
      code {{ background: #e6e6e6; padding: 2px 6px; border-radius: 4px; word-break: break-all; }}
      input[type="url"] {{ width: 100%; padding: 10px; margin: 8px 0; border: 2px solid #ddd; border-radius: 6px; font-size: 16px; box-sizing: border-box; }}
      button {{ width: 100%; padding: 10px; background: #0070f3; color: #fff; border: none; border-radius: 6px; font-size: 16px; cursor: pointer; }}
      button:hover {{ background: #0051a2; }}
    </style>
  </head>
  <body>
    <h1>PDF to Text Converter</h1>

    <section>
      <h2>Direct URL</h2>
      <p>Append the address of a PDF to this service's URL:</p>
      <p><code>{base}https://example.com/sample.pdf</code></p>
      <p>Percent-encoding the PDF address also works, e.g. <code>{base}https%3A%2F%2Fexample.com%2Fsample.pdf</code>.</p>
    </section>

    <section>
      <h2>Form</h2>
      <p>Paste a PDF URL and submit. The form redirects to the direct URL form above.</p>
      <form action="/convert" method="GET">
        <input type="url" name="url" placeholder="https://example.com/document.pdf" pattern=".*\.[pP][dD][fF]" required>
        <button type="submit">Convert to Text</button>
      </form>
      <p>Scripts can also <code>POST /convert</code> with the form field <code>pdfUrl</code>.</p>
    </section>

    <section>
      <h2>Notes</h2>
      <ul>
        <li>The URL must end with <code>.pdf</code>.</li>
        <li>The PDF must be publicly reachable from this server.</li>
        <li>Only embedded text is returned; scanned pages and encrypted files are not supported.</li>
      </ul>
    </section>
  </body>
</html>
"#
    )
}
