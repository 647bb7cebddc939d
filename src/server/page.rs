// HTML rendering for the single-page UI
// Author: kelexine (https://github.com/kelexine)

use crate::session::{Notice, Session, SUCCESS_BANNER};
use crate::vision::{ImageFormat, UploadedFile};
use html_escape::{encode_double_quoted_attribute, encode_text};

const PAGE_TITLE: &str = "MultiLanguage Image Extractor";

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0 auto; max-width: 1100px; padding: 20px; color: #222; }
.columns { display: flex; gap: 24px; flex-wrap: wrap; }
.col-main { flex: 2; min-width: 300px; }
.col-side { flex: 1; min-width: 260px; }
textarea { width: 100%; height: 250px; background-color: #f5f5f5; border: 1px solid #ccc; border-radius: 5px; padding: 10px; margin-bottom: 10px; box-sizing: border-box; }
button { background-color: #4A90E2; color: white; padding: 10px 20px; border: none; border-radius: 5px; cursor: pointer; }
button:hover { background-color: #357EBD; }
button:disabled { background-color: #9bbbe0; cursor: wait; }
img.preview { max-width: 100%; border: 1px solid #ddd; }
.caption { color: #666; font-size: 0.9em; }
.notice { border-radius: 5px; padding: 10px; margin: 10px 0; }
.success { background: #e6f4ea; }
.warning { background: #fff4e5; }
.error { background: #fdecea; }
.answer { white-space: pre-wrap; }
.spinner { display: none; color: #666; }
hr { border: 0; height: 1px; background: #ccc; margin: 20px 0; }
footer { text-align: center; color: #888; }
"#;

// Disable the button while a submission is outstanding
const SCRIPT: &str = r#"
document.getElementById('extract-form').addEventListener('submit', function () {
  var button = document.getElementById('submit');
  button.disabled = true;
  document.getElementById('spinner').style.display = 'block';
});
"#;

/// Everything the page needs to render one state.
#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub prompt: &'a str,
    pub image: Option<&'a UploadedFile>,
    pub notice: Option<&'a Notice>,
}

impl<'a> PageView<'a> {
    pub fn from_session(session: &'a Session) -> Self {
        Self {
            prompt: session.prompt(),
            image: session.image(),
            notice: session.notice(),
        }
    }
}

/// Render the full page.
pub fn render_page(view: &PageView<'_>) -> String {
    let accept = ImageFormat::accepted_extensions().join(",");

    let (preview, retained) = match view.image {
        Some(image) => {
            let data_url = image.to_data_url();
            let caption = image.file_name.as_deref().unwrap_or("Uploaded Image");
            (
                format!(
                    r#"<img class="preview" src="{url}" alt="Uploaded Image"><p class="caption">{caption}</p>"#,
                    url = encode_double_quoted_attribute(&data_url),
                    caption = encode_text(caption),
                ),
                format!(
                    r#"<input type="hidden" name="retained_image" value="{}">"#,
                    encode_double_quoted_attribute(&data_url)
                ),
            )
        }
        None => (String::new(), String::new()),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<h1>{title}</h1>
<form id="extract-form" method="post" action="/extract" enctype="multipart/form-data">
<div class="columns">
<div class="col-main">
<h2>Upload and View Image</h2>
<label for="image">Choose an image of your choice...</label><br>
<input type="file" id="image" name="image" accept="{accept}">
{retained}
{preview}
</div>
<div class="col-side">
<h2>Input and Response Section</h2>
<label for="prompt">Input Prompt:</label>
<textarea id="prompt" name="prompt">
{prompt}</textarea>
<button type="submit" id="submit">Tell me about the image</button>
<p id="spinner" class="spinner">Processing...</p>
{notice}
</div>
</div>
</form>
<hr>
<footer><p>MultiLanguage Image Extractor helps you extract and understand details from invoices in various languages using advanced AI models.</p></footer>
<script>{script}</script>
</body>
</html>
"#,
        title = PAGE_TITLE,
        style = STYLE,
        accept = accept,
        retained = retained,
        preview = preview,
        prompt = encode_text(view.prompt),
        notice = render_notice(view.notice),
        script = SCRIPT,
    )
}

fn render_notice(notice: Option<&Notice>) -> String {
    match notice {
        Some(Notice::Answer(text)) => format!(
            r#"<div class="notice success">{banner}</div><div class="answer">{text}</div>"#,
            banner = SUCCESS_BANNER,
            text = encode_text(text),
        ),
        Some(Notice::Warning(message)) => {
            format!(r#"<div class="notice warning">{}</div>"#, encode_text(message))
        }
        Some(Notice::Error(message)) => {
            format!(r#"<div class="notice error">{}</div>"#, encode_text(message))
        }
        None => String::new(),
    }
}

/// Minimal page for errors raised outside the submit flow.
pub fn render_error_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<div class="notice error">{message}</div>
<p><a href="/">Back</a></p>
</body>
</html>
"#,
        title = PAGE_TITLE,
        message = encode_text(message),
    )
}
