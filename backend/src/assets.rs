//! # Asset Classifier
//!
//! Sorts the files of a template's collection into named buckets by file suffix. Every
//! renderer format has a singular bucket holding at most one file; stylesheets, scripts,
//! databases and everything unrecognised accumulate in plural buckets keyed by the
//! file's display name.
//!
//! Rules are checked in table order and the first match wins. Suffixes are compared
//! case-insensitively. When several files hit the same singular bucket the last one in
//! collection order is kept.

use common::model::media::Media;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Lang,
    Cfg,
    Worker,
    Excel,
    Word,
    Powerpoint,
    Pdf,
    Csv,
    Json,
    Template,
    Css,
    Js,
    Db,
    Other,
}

impl Bucket {
    pub const ALL: [Bucket; 14] = [
        Bucket::Lang,
        Bucket::Cfg,
        Bucket::Worker,
        Bucket::Excel,
        Bucket::Word,
        Bucket::Powerpoint,
        Bucket::Pdf,
        Bucket::Csv,
        Bucket::Json,
        Bucket::Template,
        Bucket::Css,
        Bucket::Js,
        Bucket::Db,
        Bucket::Other,
    ];

    pub fn from_key(key: &str) -> Option<Bucket> {
        Self::ALL.into_iter().find(|bucket| bucket.key() == key)
    }

    pub const fn key(self) -> &'static str {
        match self {
            Bucket::Lang => "lang",
            Bucket::Cfg => "cfg",
            Bucket::Worker => "worker",
            Bucket::Excel => "excel",
            Bucket::Word => "word",
            Bucket::Powerpoint => "powerpoint",
            Bucket::Pdf => "pdf",
            Bucket::Csv => "csv",
            Bucket::Json => "json",
            Bucket::Template => "template",
            Bucket::Css => "css",
            Bucket::Js => "js",
            Bucket::Db => "db",
            Bucket::Other => "other",
        }
    }

    /// Plural buckets hold any number of files keyed by display name.
    pub const fn is_plural(self) -> bool {
        matches!(self, Bucket::Css | Bucket::Js | Bucket::Db | Bucket::Other)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which caller is classifying. The backend view additionally recognises worker scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Api,
    Backend,
}

struct Rule {
    suffixes: &'static [&'static str],
    bucket: Bucket,
    backend_only: bool,
}

const RULES: &[Rule] = &[
    Rule { suffixes: &[".lang.php"], bucket: Bucket::Lang, backend_only: false },
    Rule { suffixes: &[".cfg.json"], bucket: Bucket::Cfg, backend_only: false },
    Rule { suffixes: &["worker.php"], bucket: Bucket::Worker, backend_only: true },
    Rule { suffixes: &[".xlsx.php", ".xls.php"], bucket: Bucket::Excel, backend_only: false },
    Rule { suffixes: &[".docx.php", ".doc.php"], bucket: Bucket::Word, backend_only: false },
    Rule { suffixes: &[".pptx.php", ".ppt.php"], bucket: Bucket::Powerpoint, backend_only: false },
    Rule { suffixes: &[".pdf.php"], bucket: Bucket::Pdf, backend_only: false },
    Rule { suffixes: &[".csv.php"], bucket: Bucket::Csv, backend_only: false },
    Rule { suffixes: &[".json.php"], bucket: Bucket::Json, backend_only: false },
    Rule { suffixes: &[".tpl.php"], bucket: Bucket::Template, backend_only: false },
    Rule { suffixes: &[".css"], bucket: Bucket::Css, backend_only: false },
    Rule { suffixes: &[".js"], bucket: Bucket::Js, backend_only: false },
    Rule { suffixes: &[".sqlite", ".db"], bucket: Bucket::Db, backend_only: false },
];

/// A classified file together with the suffix that classified it.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub media: Media,
    /// Empty for files that fell through to `other`.
    pub suffix: &'static str,
}

impl Asset {
    /// The file path without its classifying suffix: `X.pdf.php` becomes `X`.
    pub fn renderer_path(&self) -> &str {
        let path = self.media.path.as_str();
        &path[..path.len() - self.suffix.len()]
    }
}

/// One bucket's content as handed out by [`AssetMap::entries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<'a> {
    Single(&'a Asset),
    Named(&'a BTreeMap<String, Asset>),
}

/// Result of classifying a file list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetMap {
    single: BTreeMap<Bucket, Asset>,
    named: BTreeMap<Bucket, BTreeMap<String, Asset>>,
}

impl AssetMap {
    /// The file of a singular bucket.
    pub fn get(&self, bucket: Bucket) -> Option<&Asset> {
        self.single.get(&bucket)
    }

    /// The files of a plural bucket, keyed by display name.
    pub fn named(&self, bucket: Bucket) -> Option<&BTreeMap<String, Asset>> {
        self.named.get(&bucket)
    }

    pub fn contains(&self, bucket: Bucket) -> bool {
        self.single.contains_key(&bucket) || self.named.contains_key(&bucket)
    }

    /// Every filled bucket in bucket order.
    pub fn entries(&self) -> Vec<(Bucket, Entry<'_>)> {
        let mut entries: Vec<(Bucket, Entry<'_>)> = self
            .single
            .iter()
            .map(|(bucket, asset)| (*bucket, Entry::Single(asset)))
            .chain(
                self.named
                    .iter()
                    .map(|(bucket, files)| (*bucket, Entry::Named(files))),
            )
            .collect();
        entries.sort_by_key(|(bucket, _)| *bucket);
        entries
    }

    fn insert(&mut self, bucket: Bucket, asset: Asset) {
        if bucket.is_plural() {
            self.named
                .entry(bucket)
                .or_default()
                .insert(asset.media.name.clone(), asset);
        } else {
            self.single.insert(bucket, asset);
        }
    }
}

fn ends_with_ignore_case(path: &str, suffix: &str) -> bool {
    path.len() >= suffix.len()
        && path.is_char_boundary(path.len() - suffix.len())
        && path[path.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// Finds the bucket and matching suffix for a single path.
pub fn bucket_for(path: &str, variant: Variant) -> (Bucket, &'static str) {
    RULES
        .iter()
        .filter(|rule| !rule.backend_only || variant == Variant::Backend)
        .find_map(|rule| {
            rule.suffixes
                .iter()
                .find(|suffix| ends_with_ignore_case(path, suffix))
                .map(|suffix| (rule.bucket, *suffix))
        })
        .unwrap_or((Bucket::Other, ""))
}

/// Classifies `files` in order. Pure: the same input always yields the same map.
pub fn classify(files: &[Media], variant: Variant) -> AssetMap {
    let mut assets = AssetMap::default();
    for media in files {
        let (bucket, suffix) = bucket_for(&media.path, variant);
        log::debug!("classified {} as {}", media.path, bucket);
        assets.insert(
            bucket,
            Asset {
                media: media.clone(),
                suffix,
            },
        );
    }
    assets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(id: i64, path: &str) -> Media {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        let (name, extension) = Media::split_file_name(file_name);
        Media {
            id,
            name,
            extension,
            path: path.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_each_rule() {
        let cases = [
            ("a/de.lang.php", Bucket::Lang),
            ("a/report.cfg.json", Bucket::Cfg),
            ("a/report.xlsx.php", Bucket::Excel),
            ("a/report.xls.php", Bucket::Excel),
            ("a/report.docx.php", Bucket::Word),
            ("a/report.doc.php", Bucket::Word),
            ("a/report.pptx.php", Bucket::Powerpoint),
            ("a/report.ppt.php", Bucket::Powerpoint),
            ("a/report.pdf.php", Bucket::Pdf),
            ("a/report.csv.php", Bucket::Csv),
            ("a/report.json.php", Bucket::Json),
            ("a/report.tpl.php", Bucket::Template),
            ("a/styles.css", Bucket::Css),
            ("a/chart.js", Bucket::Js),
            ("a/data.sqlite", Bucket::Db),
            ("a/data.db", Bucket::Db),
            ("a/logo.png", Bucket::Other),
        ];
        for (path, expected) in cases {
            assert_eq!(bucket_for(path, Variant::Api).0, expected, "{}", path);
        }
    }

    #[test]
    fn test_suffix_match_is_case_insensitive() {
        assert_eq!(
            bucket_for("Files/Report.PDF.php", Variant::Api),
            (Bucket::Pdf, ".pdf.php")
        );
        assert_eq!(bucket_for("Files/STYLE.CSS", Variant::Api).0, Bucket::Css);
    }

    #[test]
    fn test_worker_rule_only_in_backend_variant() {
        assert_eq!(bucket_for("a/worker.php", Variant::Backend).0, Bucket::Worker);
        assert_eq!(bucket_for("a/worker.php", Variant::Api).0, Bucket::Other);
    }

    #[test]
    fn test_language_file_wins_over_later_rules() {
        // `.lang.php` is checked before the generic `.php` renderers.
        assert_eq!(bucket_for("a/en.lang.php", Variant::Backend).0, Bucket::Lang);
    }

    #[test]
    fn test_singular_bucket_keeps_last_match() {
        let files = vec![media(1, "a/first.pdf.php"), media(2, "a/second.pdf.php")];
        let assets = classify(&files, Variant::Api);
        assert_eq!(assets.get(Bucket::Pdf).map(|a| a.media.id), Some(2));
    }

    #[test]
    fn test_plural_buckets_key_by_display_name() {
        let files = vec![
            media(1, "a/styles.css"),
            media(2, "a/print.css"),
            media(3, "a/one.db"),
            media(4, "a/two.sqlite"),
            media(5, "a/logo.png"),
        ];
        let assets = classify(&files, Variant::Api);

        let css = assets.named(Bucket::Css).unwrap();
        assert_eq!(css.len(), 2);
        assert_eq!(css["styles"].media.id, 1);
        assert_eq!(css["print"].media.id, 2);

        let db = assets.named(Bucket::Db).unwrap();
        assert_eq!(db.keys().collect::<Vec<_>>(), vec!["one", "two"]);

        assert_eq!(assets.named(Bucket::Other).unwrap()["logo"].media.id, 5);
        assert!(assets.get(Bucket::Css).is_none());
    }

    #[test]
    fn test_classification_is_repeatable() {
        let files = vec![
            media(1, "a/report.tpl.php"),
            media(2, "a/styles.css"),
            media(3, "a/report.pdf.php"),
            media(4, "a/other.pdf.php"),
        ];
        assert_eq!(
            classify(&files, Variant::Api),
            classify(&files, Variant::Api)
        );
    }

    #[test]
    fn test_renderer_path_strips_matched_suffix() {
        let assets = classify(
            &[media(1, "X.pdf.php"), media(2, "Y.xlsx.php"), media(3, "Z.json.php")],
            Variant::Api,
        );
        assert_eq!(assets.get(Bucket::Pdf).unwrap().renderer_path(), "X");
        assert_eq!(assets.get(Bucket::Excel).unwrap().renderer_path(), "Y");
        assert_eq!(assets.get(Bucket::Json).unwrap().renderer_path(), "Z");
    }

    #[test]
    fn test_entries_in_bucket_order() {
        let assets = classify(
            &[media(1, "a/styles.css"), media(2, "a/report.tpl.php")],
            Variant::Api,
        );
        let buckets: Vec<Bucket> = assets.entries().into_iter().map(|(b, _)| b).collect();
        assert_eq!(buckets, vec![Bucket::Template, Bucket::Css]);
    }

    #[test]
    fn test_bucket_keys() {
        for bucket in Bucket::ALL {
            assert_eq!(Bucket::from_key(bucket.key()), Some(bucket));
        }
        assert_eq!(Bucket::from_key("xlsx"), None);
    }

    #[test]
    fn test_only_template_file() {
        let assets = classify(&[media(1, "report.tpl.php")], Variant::Api);
        assert_eq!(assets.entries().len(), 1);
        assert_eq!(assets.get(Bucket::Template).unwrap().renderer_path(), "report");
    }
}
