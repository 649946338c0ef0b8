use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::catalog::Catalog;
use crate::export::{Exporter, JSON_FILE, SHELL_FILE, STYLE};

/// Writes the static page that renders `price_lists.json` in the browser.
///
/// The page carries no data of its own. It must sit next to the JSON file
/// and be served over HTTP, since browsers refuse `fetch` on `file://`.
#[derive(Debug, Clone)]
pub struct ShellExporter {
    out_dir: PathBuf,
    link_prefix: String,
}

impl ShellExporter {
    pub fn new(out_dir: PathBuf, link_prefix: impl Into<String>) -> Self {
        Self {
            out_dir,
            link_prefix: link_prefix.into(),
        }
    }

    pub fn render(&self) -> String {
        let prefix = serde_json::to_string(&self.link_prefix).unwrap_or_else(|_| "\"\"".to_string());
        let data_url = serde_json::to_string(JSON_FILE).unwrap_or_else(|_| "\"\"".to_string());
        SHELL_TEMPLATE
            .replace("__STYLE__", STYLE)
            .replace("__LINK_PREFIX__", &prefix)
            .replace("__DATA_URL__", &data_url)
    }
}

impl Exporter for ShellExporter {
    fn export(&self, _catalog: &Catalog) -> Result<()> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("failed to create {}", self.out_dir.display()))?;
        let path = self.out_dir.join(SHELL_FILE);
        fs::write(&path, self.render()).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

const SHELL_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Van Price Lists Summary</title>
    <style>__STYLE__</style>
</head>
<body>
    <div class="container">
        <h1>Van Price Lists Summary</h1>
        <p class="subtitle">Complete overview of all available price lists organized by manufacturer and model</p>
        <div id="content"><p>Loading price lists&hellip;</p></div>
        <div class="footer"><p id="generated"></p></div>
    </div>
<script>
const LINK_PREFIX = __LINK_PREFIX__;
const DATA_URL = __DATA_URL__;

function esc(value) {
  return String(value)
    .replace(/&/g, '&amp;')
    .replace(/</g, '&lt;')
    .replace(/>/g, '&gt;')
    .replace(/"/g, '&quot;');
}

function formatDate(value) {
  const m = /^(\d{4})-(\d{2})-(\d{2})$/.exec(value);
  if (!m) return null;
  const [y, mo, d] = [Number(m[1]), Number(m[2]), Number(m[3])];
  const date = new Date(Date.UTC(y, mo - 1, d));
  if (date.getUTCFullYear() !== y || date.getUTCMonth() !== mo - 1 || date.getUTCDate() !== d) {
    return null;
  }
  return `${m[3]}.${m[2]}.${m[1]}`;
}

const MONTHS = ['January', 'February', 'March', 'April', 'May', 'June', 'July',
  'August', 'September', 'October', 'November', 'December'];

// "2025-03-20" as "March 20, 2025"; anything else is shown as it is
function formatGenerated(value) {
  const m = /^(\d{4})-(\d{2})-(\d{2})$/.exec(value);
  if (!m || !formatDate(value)) return value;
  return `${MONTHS[Number(m[2]) - 1]} ${m[3]}, ${m[1]}`;
}

function linkTarget(filename) {
  return filename.startsWith('/') ? filename : LINK_PREFIX + filename;
}

function badges(pl) {
  const out = [];
  if (pl.priceRange) out.push(['price', pl.priceRange]);
  if (pl.modelYear) out.push(['year', `MY ${pl.modelYear}`]);
  if (pl.variant) out.push(['variant', pl.variant]);
  if (pl.validityDate) {
    const formatted = formatDate(pl.validityDate);
    out.push(['date', formatted ? `Valid from ${formatted}` : pl.validityDate]);
  }
  return out;
}

function renderPriceList(pl) {
  const variants = pl.variants && pl.variants.length
    ? `<div class="variants">${esc(pl.variants.join(', '))}</div>`
    : '';
  const badgeHtml = badges(pl)
    .map(([cls, text]) => `<span class="badge ${cls}">${esc(text)}</span>`)
    .join('');
  return `<li class="price-list-item"><div>` +
    `<a href="${esc(linkTarget(pl.filename))}" class="price-list-link" target="_blank">${esc(pl.basename)}</a>` +
    `${variants}</div><div class="metadata">${badgeHtml}</div></li>`;
}

function renderStats(stats) {
  const item = (n, label) =>
    `<div class="stat-item"><div class="stat-number">${n}</div><div class="stat-label">${label}</div></div>`;
  return `<div class="stats">${item(stats.totalManufacturers, 'Manufacturers')}` +
    `${item(stats.totalModels, 'Models')}${item(stats.totalPriceLists, 'Price Lists')}</div>`;
}

function render(data) {
  let html = renderStats(data.stats);
  for (const make of data.manufacturers) {
    html += `<div class="make-section"><div class="make-header">${esc(make.name)}</div>`;
    for (const model of make.models) {
      html += `<div class="model-group"><div class="model-title">${esc(model.name)}</div><ul class="price-list">`;
      html += model.priceLists.map(renderPriceList).join('');
      html += '</ul></div>';
    }
    html += '</div>';
  }
  document.getElementById('content').innerHTML = html;
  if (data.generatedAt) {
    document.getElementById('generated').textContent = `Generated on ${formatGenerated(data.generatedAt)}`;
  }
}

function showError(err) {
  document.getElementById('content').innerHTML =
    `<div class="error"><strong>Could not load ${esc(DATA_URL)}.</strong><br>` +
    `${esc(err && err.message ? err.message : err)}<br>` +
    'Serve this folder over HTTP (for example <code>python3 -m http.server</code>); ' +
    'browsers block fetch() on file:// pages.</div>';
}

fetch(DATA_URL)
  .then((resp) => {
    if (!resp.ok) throw new Error(`HTTP ${resp.status}`);
    return resp.json();
  })
  .then(render)
  .catch(showError);
</script>
</body>
</html>
"#;
