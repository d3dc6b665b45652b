use crate::error::{HelperError, Result};
use genpdf::elements::{Break, Image as PdfImage, LinearLayout, Paragraph};
use genpdf::style::{Style, StyledString};
use genpdf::Document;
use image::imageops::FilterType;
use image::{load_from_memory, DynamicImage, GenericImageView};
use png::{BitDepth as PngBitDepth, ColorType as PngColorType, Encoder as PngEncoder};
use std::collections::HashMap;
use std::path::Path;
use tempfile::NamedTempFile;

const PAGE_WIDTH_INCH: f64 = 8.5;
const MARGIN_MM: f64 = 10.0;
const IMAGE_DPI: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextStyle {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl TextStyle {
    fn from_marker(len: usize) -> Self {
        match len {
            1 => TextStyle::Italic,
            2 => TextStyle::Bold,
            _ => TextStyle::BoldItalic,
        }
    }

    fn style(self) -> Style {
        match self {
            TextStyle::Regular => Style::new(),
            TextStyle::Bold => Style::new().bold(),
            TextStyle::Italic => Style::new().italic(),
            TextStyle::BoldItalic => Style::new().bold().italic(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TextSegment {
    text: String,
    style: TextStyle,
}

/// Splits `***both***`, `**bold**` and `*italic*` runs out of a line.
/// Markers without a closing partner stay as literal text.
fn parse_styles(line: &str) -> Vec<TextSegment> {
    let mut segments = Vec::new();
    let mut push = |text: &str, style: TextStyle| {
        if !text.is_empty() {
            segments.push(TextSegment {
                text: text.to_string(),
                style,
            });
        }
    };

    let mut rest = line;
    while let Some(start) = rest.find('*') {
        push(&rest[..start], TextStyle::Regular);
        let after = &rest[start..];
        let marker_len = after.bytes().take_while(|b| *b == b'*').count().min(3);
        let (marker, body) = after.split_at(marker_len);
        match body.find(marker) {
            Some(end) if end > 0 => {
                push(&body[..end], TextStyle::from_marker(marker_len));
                rest = &body[end + marker_len..];
            }
            _ => {
                push(marker, TextStyle::Regular);
                rest = body;
            }
        }
    }
    push(rest, TextStyle::Regular);
    segments
}

fn styled_paragraph(prefix: Option<&str>, text: &str) -> Paragraph {
    let mut paragraph = Paragraph::new("");
    if let Some(prefix) = prefix {
        paragraph.push(StyledString::new(prefix.to_string(), Style::new()));
    }
    for segment in parse_styles(text) {
        paragraph.push(StyledString::new(segment.text, segment.style.style()));
    }
    paragraph
}

/// How a single line of renderer text is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    ListItem(&'a str),
    Image(&'a str),
    Text(&'a str),
}

fn classify_line(line: &str) -> Line<'_> {
    if line.trim().is_empty() {
        Line::Blank
    } else if let Some(item) = line.strip_prefix("- ") {
        Line::ListItem(item)
    } else if let Some(name) = image_name(line) {
        Line::Image(name)
    } else {
        Line::Text(line)
    }
}

/// The file referenced by an `[img:name.ext]` line.
pub fn image_name(line: &str) -> Option<&str> {
    line.trim()
        .strip_prefix("[img:")
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

fn load_font(fonts_dir: &Path) -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>> {
    if let Ok(family) = genpdf::fonts::from_files(fonts_dir, "Arial", None) {
        return Ok(family);
    }
    genpdf::fonts::from_files(fonts_dir, "LiberationSans", None).map_err(|e| {
        HelperError::render(format!("no usable font in {}: {}", fonts_dir.display(), e))
    })
}

fn configure_document(title: &str, fonts_dir: &Path) -> Result<Document> {
    let mut doc = Document::new(load_font(fonts_dir)?);
    doc.set_title(title);
    doc.set_font_size(10);
    doc.set_line_spacing(1.0f64);

    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(MARGIN_MM as i32);
    doc.set_page_decorator(decorator);
    Ok(doc)
}

/// Scales an image to the printable width of a Letter page, flattens transparency onto
/// white and writes it as an RGB PNG that genpdf can embed.
fn image_element(bytes: &[u8], temp_files: &mut Vec<NamedTempFile>) -> Result<PdfImage> {
    let content_width_in = PAGE_WIDTH_INCH - 2.0 * (MARGIN_MM / 25.4);
    let target_px = content_width_in * IMAGE_DPI;

    let img = load_from_memory(bytes)?;
    let (orig_w, orig_h) = img.dimensions();
    let scale = (target_px / orig_w as f64).min(1.0);
    let resized: DynamicImage = if scale >= 1.0 {
        img
    } else {
        let new_w = (orig_w as f64 * scale).max(1.0).round() as u32;
        let new_h = (orig_h as f64 * scale).max(1.0).round() as u32;
        img.resize(new_w, new_h, FilterType::Lanczos3)
    };

    let rgba = resized.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut background = image::RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 255]));
    image::imageops::overlay(&mut background, &rgba, 0, 0);
    let raw = DynamicImage::ImageRgba8(background).to_rgb8().into_raw();

    let mut tmp = NamedTempFile::new()?;
    {
        let mut encoder = PngEncoder::new(tmp.as_file_mut(), w, h);
        encoder.set_color(PngColorType::Rgb);
        encoder.set_depth(PngBitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&raw)?;
    }

    let mut element = PdfImage::from_path(tmp.path())?;
    element.set_dpi(IMAGE_DPI);
    // The file has to outlive the document render.
    temp_files.push(tmp);
    Ok(element)
}

/// Lays out `text` line by line and returns the finished PDF.
///
/// `images` holds the bytes of report files referenced by `[img:...]` lines; a missing
/// one is replaced by a short notice instead of failing the export.
pub fn render(
    text: &str,
    title: &str,
    fonts_dir: &Path,
    images: &HashMap<String, Vec<u8>>,
) -> Result<Vec<u8>> {
    let mut doc = configure_document(title, fonts_dir)?;
    let mut temp_files: Vec<NamedTempFile> = Vec::new();

    for line in text.lines() {
        match classify_line(line) {
            Line::Blank => doc.push(Break::new(1)),
            Line::ListItem(item) => {
                let mut layout = LinearLayout::vertical();
                layout.push(styled_paragraph(Some("• "), item));
                doc.push(layout);
            }
            Line::Image(name) => match images.get(name) {
                Some(bytes) => doc.push(image_element(bytes, &mut temp_files)?),
                None => doc.push(Paragraph::new(format!("[missing image: {}]", name))),
            },
            Line::Text(text) => doc.push(styled_paragraph(None, text)),
        }
    }

    let mut out = Vec::new();
    doc.render(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str, style: TextStyle) -> TextSegment {
        TextSegment {
            text: text.to_string(),
            style,
        }
    }

    #[test]
    fn test_parse_styles() {
        assert_eq!(
            parse_styles("plain **bold** and *it* or ***both***"),
            vec![
                seg("plain ", TextStyle::Regular),
                seg("bold", TextStyle::Bold),
                seg(" and ", TextStyle::Regular),
                seg("it", TextStyle::Italic),
                seg(" or ", TextStyle::Regular),
                seg("both", TextStyle::BoldItalic),
            ]
        );
    }

    #[test]
    fn test_unmatched_marker_is_literal() {
        assert_eq!(
            parse_styles("5 * 3"),
            vec![
                seg("5 ", TextStyle::Regular),
                seg("*", TextStyle::Regular),
                seg(" 3", TextStyle::Regular),
            ]
        );
        assert_eq!(parse_styles(""), vec![]);
    }

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line("   "), Line::Blank);
        assert_eq!(classify_line("- item"), Line::ListItem("item"));
        assert_eq!(classify_line("[img: chart.png ]"), Line::Image("chart.png"));
        assert_eq!(classify_line("[img:]"), Line::Text("[img:]"));
        assert_eq!(classify_line("Total: 5"), Line::Text("Total: 5"));
    }

    #[test]
    fn test_missing_fonts() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = render("hello", "T", dir.path(), &HashMap::new()).unwrap_err();
        assert!(matches!(err, HelperError::Render(_)));
    }
}
