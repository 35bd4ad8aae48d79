//! Asset pipeline for the inlined CSS and JavaScript.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the page stylesheet.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the table filtering and sorting script.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// Stylesheet ready for inlining, minified when requested.
    pub fn stylesheet(minify: bool) -> String {
        let css = Self::generate_css();
        if !minify {
            return css;
        }

        match Self::minify_css(&css) {
            Ok(minified) => minified,
            Err(e) => {
                tracing::warn!("Falling back to unminified CSS: {}", e);
                css
            }
        }
    }
}

const DEFAULT_CSS: &str = r#"/* fontsize table theme */

:root {
  --background: #ffffff;
  --foreground: #1c1f23;
  --muted: #f4f5f7;
  --muted-foreground: #5c6370;
  --border: #dfe2e6;
  --primary: #2f6fde;
  --primary-foreground: #ffffff;
  --radius: 0.375rem;
  --content-max-width: 1200px;
}

@media (prefers-color-scheme: dark) {
  :root {
    --background: #16181c;
    --foreground: #e6e8eb;
    --muted: #22252a;
    --muted-foreground: #9aa1ab;
    --border: #33373e;
    --primary: #6b9cf0;
    --primary-foreground: #0d0f12;
  }
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.5;
}

.main {
  max-width: var(--content-max-width);
  margin: 0 auto;
  padding: 2rem 1.5rem;
}

.header h1 {
  font-size: 2rem;
  margin: 0 0 0.5rem;
}

.summary {
  color: var(--muted-foreground);
  margin: 0 0 1.5rem;
}

a {
  color: var(--primary);
}

code {
  font-family: ui-monospace, monospace;
  font-size: 0.875em;
  background: var(--muted);
  padding: 0.125rem 0.375rem;
  border-radius: 0.25rem;
}

/* Controls */
.controls {
  display: flex;
  flex-wrap: wrap;
  align-items: center;
  gap: 0.75rem;
  margin-bottom: 1rem;
}

#filter {
  flex: 1 1 18rem;
  padding: 0.5rem 0.75rem;
  font: inherit;
  color: inherit;
  background: var(--background);
  border: 1px solid var(--border);
  border-radius: var(--radius);
}

.count {
  color: var(--muted-foreground);
  font-variant-numeric: tabular-nums;
}

.chips {
  display: flex;
  flex-wrap: wrap;
  gap: 0.375rem;
  width: 100%;
}

.axis-chip {
  font: inherit;
  font-size: 0.8125rem;
  padding: 0.125rem 0.625rem;
  color: var(--muted-foreground);
  background: var(--muted);
  border: 1px solid var(--border);
  border-radius: 999px;
  cursor: pointer;
}

.axis-chip.active {
  color: var(--primary-foreground);
  background: var(--primary);
  border-color: var(--primary);
}

/* Table */
table.fonts {
  width: 100%;
  border-collapse: collapse;
  font-size: 0.9375rem;
}

table.fonts th,
table.fonts td {
  padding: 0.5rem 0.75rem;
  border-bottom: 1px solid var(--border);
  text-align: left;
  vertical-align: top;
}

table.fonts th {
  position: sticky;
  top: 0;
  background: var(--muted);
  font-weight: 600;
  white-space: nowrap;
  cursor: pointer;
  user-select: none;
}

table.fonts th.sorted-asc::after {
  content: " \25B2";
  font-size: 0.75em;
}

table.fonts th.sorted-desc::after {
  content: " \25BC";
  font-size: 0.75em;
}

table.fonts tbody tr:hover {
  background: var(--muted);
}

.num {
  text-align: right;
  font-variant-numeric: tabular-nums;
  white-space: nowrap;
}

table.fonts th.num {
  text-align: right;
}

.tag {
  display: inline-block;
  margin: 0 0.25rem 0.125rem 0;
  padding: 0 0.375rem;
  font-family: ui-monospace, monospace;
  font-size: 0.8125rem;
  background: var(--muted);
  border: 1px solid var(--border);
  border-radius: 0.25rem;
}

.empty,
.failed {
  color: var(--muted-foreground);
}

.footer {
  max-width: var(--content-max-width);
  margin: 0 auto;
  padding: 1rem 1.5rem 2rem;
  font-size: 0.8125rem;
  color: var(--muted-foreground);
}
"#;

const DEFAULT_JS: &str = r#"// fontsize - client-side table filtering and sorting
(function() {
  'use strict';

  const table = document.querySelector('table.fonts');
  if (!table || !table.tBodies.length) return;

  const tbody = table.tBodies[0];
  const rows = Array.from(tbody.rows);
  const filter = document.getElementById('filter');
  const counter = document.getElementById('visible-count');
  const activeAxes = new Set();

  function matches(row, needle) {
    if (!needle) return true;
    return row.textContent.toLowerCase().includes(needle);
  }

  function hasAxes(row) {
    if (!activeAxes.size) return true;
    const axes = (row.dataset.axes || '').split(' ');
    for (const axis of activeAxes) {
      if (!axes.includes(axis)) return false;
    }
    return true;
  }

  function applyFilter() {
    const needle = filter ? filter.value.trim().toLowerCase() : '';
    let visible = 0;

    rows.forEach(row => {
      const show = matches(row, needle) && hasAxes(row);
      row.hidden = !show;
      if (show) visible += 1;
    });

    if (counter) counter.textContent = String(visible);
  }

  if (filter) {
    filter.addEventListener('input', applyFilter);
  }

  document.querySelectorAll('.axis-chip').forEach(chip => {
    chip.addEventListener('click', () => {
      const axis = chip.dataset.axis;
      if (activeAxes.has(axis)) {
        activeAxes.delete(axis);
        chip.classList.remove('active');
      } else {
        activeAxes.add(axis);
        chip.classList.add('active');
      }
      applyFilter();
    });
  });

  // Sorting; missing numbers sort last in both directions
  function sortKey(row, key, numeric) {
    const raw = row.dataset[key] || '';
    if (!numeric) return raw.toLowerCase();
    return raw === '' ? null : Number(raw);
  }

  function compare(a, b, numeric, direction) {
    if (numeric) {
      if (a === null && b === null) return 0;
      if (a === null) return 1;
      if (b === null) return -1;
      return (a - b) * direction;
    }
    return a.localeCompare(b) * direction;
  }

  const headers = Array.from(table.querySelectorAll('th[data-sort]'));

  headers.forEach(th => {
    th.addEventListener('click', () => {
      const key = th.dataset.sort;
      const numeric = th.dataset.type === 'number';
      const direction = th.classList.contains('sorted-asc') ? -1 : 1;

      headers.forEach(h => h.classList.remove('sorted-asc', 'sorted-desc'));
      th.classList.add(direction === 1 ? 'sorted-asc' : 'sorted-desc');

      const sorted = rows.slice().sort((ra, rb) =>
        compare(sortKey(ra, key, numeric), sortKey(rb, key, numeric), numeric, direction)
      );
      sorted.forEach(row => tbody.appendChild(row));
    });
  });

  applyFilter();
})();
"#;
