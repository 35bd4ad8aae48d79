//! Template engine for rendering size tables.

use minijinja::{context, Environment};

use fontsize_data::{format_size, DatasetTotals, SourceInfo};

/// One row of the overview table.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FontRow {
    pub id: String,
    pub family: String,
    pub category: String,
    /// Axis tags, sorted
    pub axes: Vec<String>,
    pub styles: Vec<String>,
    pub subset_count: usize,
    pub file_count: usize,
    /// Default subset, normal style, woff2
    pub default_woff2: Option<u64>,
    pub total_woff2: u64,
    pub last_modified: String,
    /// Link to the detail page, when detail pages are generated.
    /// Rendered unescaped; built from sanitized ids only.
    pub detail_url: Option<String>,
}

/// One row of a font's file table.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FileRow {
    pub name: String,
    pub subset: String,
    pub axis: String,
    pub style: String,
    pub format: String,
    pub size: u64,
}

/// Context for the overview page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct IndexContext {
    pub title: String,
    pub base_url: String,
    pub css: String,
    pub js: String,
    pub generated_at: String,
    pub source: SourceInfo,
    pub totals: DatasetTotals,
    pub rows: Vec<FontRow>,
    /// Every axis tag present in the dataset
    pub axes: Vec<String>,
    pub failed: Vec<String>,
    /// Link to the raw dataset, when written
    pub json_url: Option<String>,
}

/// Context for a font detail page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FontContext {
    pub title: String,
    pub base_url: String,
    pub css: String,
    pub js: String,
    pub generated_at: String,
    pub index_url: String,
    pub font: FontRow,
    pub files: Vec<FileRow>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_filter("filesize", filesize);

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");
        env.add_template_owned("index.html".to_string(), INDEX_TEMPLATE.to_string())
            .expect("Failed to add index template");
        env.add_template_owned("font.html".to_string(), FONT_TEMPLATE.to_string())
            .expect("Failed to add font template");

        Self { env }
    }

    /// Render the overview page.
    pub fn render_index(&self, ctx: &IndexContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("index.html")?;

        tmpl.render(context! {
            title => &ctx.title,
            base_url => &ctx.base_url,
            css => &ctx.css,
            js => &ctx.js,
            generated_at => &ctx.generated_at,
            source => &ctx.source,
            totals => &ctx.totals,
            rows => &ctx.rows,
            axes => &ctx.axes,
            failed => &ctx.failed,
            json_url => &ctx.json_url,
        })
    }

    /// Render a font detail page.
    pub fn render_font(&self, ctx: &FontContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("font.html")?;

        tmpl.render(context! {
            title => &ctx.title,
            base_url => &ctx.base_url,
            css => &ctx.css,
            js => &ctx.js,
            generated_at => &ctx.generated_at,
            index_url => &ctx.index_url,
            font => &ctx.font,
            files => &ctx.files,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn filesize(bytes: u64) -> String {
    format_size(bytes)
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% block title %}{{ title }}{% endblock %}</title>
  <style>{{ css | safe }}</style>
</head>
<body>
  <main class="main">
    {% block content %}{% endblock %}
  </main>
  <footer class="footer">Generated {{ generated_at }}</footer>
  <script>{{ js | safe }}</script>
</body>
</html>"##;

const INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<header class="header">
  <h1>{{ title }}</h1>
  <p class="summary">
    {{ totals.fonts }} fonts, {{ totals.files }} files, {{ totals.woff2_bytes | filesize }} of woff2
    from <code>{{ source.owner }}/{{ source.repo }}@{{ source.branch }}:{{ source.root }}</code>
    {% if json_url %}&middot; <a href="{{ json_url | safe }}">raw data</a>{% endif %}
  </p>
</header>

{% if rows %}
<section class="controls">
  <input id="filter" type="search" placeholder="Filter by family, category or axis" autocomplete="off">
  <span class="count"><span id="visible-count">{{ rows | length }}</span> / {{ rows | length }}</span>
  <div class="chips">
  {% for axis in axes %}
    <button type="button" class="axis-chip" data-axis="{{ axis }}">{{ axis }}</button>
  {% endfor %}
  </div>
</section>

<table class="fonts">
  <thead>
    <tr>
      <th data-sort="family" data-type="text">Family</th>
      <th data-sort="category" data-type="text">Category</th>
      <th data-sort="axes" data-type="text">Axes</th>
      <th data-sort="styles" data-type="text">Styles</th>
      <th data-sort="subsets" data-type="number" class="num">Subsets</th>
      <th data-sort="files" data-type="number" class="num">Files</th>
      <th data-sort="default" data-type="number" class="num">Default woff2</th>
      <th data-sort="total" data-type="number" class="num">Total woff2</th>
      <th data-sort="modified" data-type="text">Modified</th>
    </tr>
  </thead>
  <tbody>
  {% for row in rows %}
    <tr data-family="{{ row.family | lower }}" data-category="{{ row.category }}" data-axes="{{ row.axes | join(' ') }}"
        data-styles="{{ row.styles | join(' ') }}" data-subsets="{{ row.subset_count }}" data-files="{{ row.file_count }}"
        data-default="{% if row.default_woff2 is not none %}{{ row.default_woff2 }}{% endif %}" data-total="{{ row.total_woff2 }}"
        data-modified="{{ row.last_modified }}">
      <td>{% if row.detail_url %}<a href="{{ row.detail_url | safe }}">{{ row.family }}</a>{% else %}{{ row.family }}{% endif %}</td>
      <td>{{ row.category }}</td>
      <td>{% for axis in row.axes %}<span class="tag">{{ axis }}</span>{% endfor %}</td>
      <td>{{ row.styles | join(", ") }}</td>
      <td class="num">{{ row.subset_count }}</td>
      <td class="num">{{ row.file_count }}</td>
      <td class="num">{% if row.default_woff2 is not none %}{{ row.default_woff2 | filesize }}{% else %}&ndash;{% endif %}</td>
      <td class="num">{{ row.total_woff2 | filesize }}</td>
      <td>{{ row.last_modified }}</td>
    </tr>
  {% endfor %}
  </tbody>
</table>
{% else %}
<p class="empty">No fonts were collected.</p>
{% endif %}

{% if failed %}
<section class="failed">
  <h2>Not collected</h2>
  <p>{{ failed | join(", ") }}</p>
</section>
{% endif %}
{% endblock %}"##;

const FONT_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block title %}{{ font.family }} - {{ title }}{% endblock %}

{% block content %}
<header class="header">
  <p><a href="{{ index_url | safe }}">&larr; All fonts</a></p>
  <h1>{{ font.family }}</h1>
  <p class="summary">
    {{ font.category }} &middot; axes {{ font.axes | join(", ") }} &middot;
    {{ font.file_count }} files, {{ font.total_woff2 | filesize }} of woff2
  </p>
</header>

<table class="fonts">
  <thead>
    <tr>
      <th data-sort="name" data-type="text">File</th>
      <th data-sort="subset" data-type="text">Subset</th>
      <th data-sort="axis" data-type="text">Axis</th>
      <th data-sort="style" data-type="text">Style</th>
      <th data-sort="format" data-type="text">Format</th>
      <th data-sort="size" data-type="number" class="num">Size</th>
    </tr>
  </thead>
  <tbody>
  {% for file in files %}
    <tr data-name="{{ file.name }}" data-subset="{{ file.subset }}" data-axis="{{ file.axis }}" data-axes="{{ file.axis }}"
        data-style="{{ file.style }}" data-format="{{ file.format }}" data-size="{{ file.size }}">
      <td><code>{{ file.name }}</code></td>
      <td>{{ file.subset }}</td>
      <td><span class="tag">{{ file.axis }}</span></td>
      <td>{{ file.style }}</td>
      <td>{{ file.format }}</td>
      <td class="num" title="{{ file.size }} bytes">{{ file.size | filesize }}</td>
    </tr>
  {% endfor %}
  </tbody>
</table>
{% endblock %}"##;
