//! HTML renderer: generates a self-contained report page.
//!
//! Embeds the report model as JSON and renders the category/suite/case
//! tree client-side with vanilla JS; the summary bar is rendered
//! server-side so the page degrades usefully without scripting.

use crate::report::Report;

/// Escapes a string for embedding inside a script block
fn escape_json_for_script(s: &str) -> String {
    // serde_json already escapes quotes/backslashes; we just need to
    // ensure no </script> can appear inside the block.
    s.replace("</script>", "<\\/script>")
}

/// Escapes text interpolated into HTML element content
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renderer that generates a self-contained HTML report
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Generate the full HTML document for one report
    pub fn render(&self, report: &Report) -> String {
        let payload = serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string());
        let counts = &report.counts;

        let mut html = String::with_capacity(16_384);
        html.push_str(Self::template_head());
        html.push_str(&format!(
            "<style>:root{{--rag-red:{};--rag-amber:{};--rag-green:{}}}</style>\n",
            escape_html(&report.palette.red),
            escape_html(&report.palette.amber),
            escape_html(&report.palette.green),
        ));
        html.push_str("</head>\n<body>\n");

        html.push_str("<header>\n<h1>");
        html.push_str(&escape_html(&report.title));
        html.push_str("</h1>\n");
        html.push_str(&format!(
            "<span class=\"badge rag-{status}\">{status}</span>\n</header>\n",
            status = report.status,
        ));

        html.push_str("<div class=\"stats-bar\">\n");
        for (label, value) in [
            ("total", counts.total),
            ("passed", counts.passed()),
            ("failed", counts.failed),
            ("errors", counts.errors),
            ("skipped", counts.skipped),
        ] {
            html.push_str(&format!(
                "<div class=\"stat\"><span class=\"val\">{value}</span><span class=\"lbl\">{label}</span></div>\n"
            ));
        }
        html.push_str("</div>\n");

        html.push_str("<script>const DATA=");
        html.push_str(&escape_json_for_script(&payload));
        html.push_str(";</script>\n");
        html.push_str(Self::template_body());
        html.push_str(Self::template_script());
        html.push_str(&format!(
            "<footer>Generated {}</footer>\n",
            escape_html(&report.generated_at)
        ));
        html.push_str("</body>\n</html>");
        html
    }

    // ─── HTML template pieces ────────────────────────────────────────────

    fn template_head() -> &'static str {
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Test Report</title>
<style>
*{box-sizing:border-box;margin:0;padding:0}
body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,Oxygen,sans-serif;background:#0d0d11;color:#e4e4e7;line-height:1.5;min-height:100vh}
header{padding:1.25rem 1.5rem;border-bottom:1px solid #2a2a32;display:flex;align-items:center;gap:1rem}
header h1{font-size:1.125rem;font-weight:700}
.badge{font-size:.6875rem;font-weight:700;padding:.2rem .6rem;border-radius:10px;text-transform:uppercase;color:#0d0d11}
.rag-red{background:var(--rag-red)}
.rag-amber{background:var(--rag-amber)}
.rag-green{background:var(--rag-green)}
.stats-bar{display:flex;border-bottom:1px solid #2a2a32;background:#16161b}
.stat{flex:1;padding:.875rem 1.25rem;border-right:1px solid #2a2a32;text-align:center}
.stat:last-child{border-right:none}
.stat .val{font-size:1.5rem;font-weight:700;display:block;font-variant-numeric:tabular-nums}
.stat .lbl{font-size:.75rem;color:#71717a;text-transform:uppercase;letter-spacing:.5px}
main{padding:1rem 1.5rem;max-width:1100px}
.category{margin-bottom:1.25rem}
.category>h2{font-size:.875rem;font-weight:600;padding:.5rem .75rem;background:#16161b;border:1px solid #2a2a32;border-radius:8px;display:flex;align-items:center;gap:.75rem}
.category>h2 .counts{font-size:.75rem;color:#71717a;font-weight:400;margin-left:auto;font-variant-numeric:tabular-nums}
.suite{margin:.375rem 0 .375rem 1rem;border:1px solid #2a2a32;border-radius:8px;overflow:hidden}
.suite-hdr{display:flex;align-items:center;gap:.75rem;padding:.5rem .75rem;background:#16161b;cursor:pointer;user-select:none;font-size:.8125rem}
.suite-hdr .name{font-weight:600;flex:1;overflow:hidden;text-overflow:ellipsis;white-space:nowrap}
.suite-hdr .time{color:#71717a;font-size:.75rem;font-variant-numeric:tabular-nums}
.cases{display:none}
.cases.open{display:block}
.case-row{display:grid;grid-template-columns:minmax(0,1fr) 80px 70px;gap:.5rem;padding:.375rem .75rem;border-top:1px solid #2a2a32;font-size:.8125rem;align-items:center}
.case-row .cname{overflow:hidden;text-overflow:ellipsis;white-space:nowrap}
.case-row .cstatus{font-weight:600;text-transform:uppercase;font-size:.6875rem}
.case-row .ctime{color:#71717a;text-align:right;font-variant-numeric:tabular-nums}
.case-detail{grid-column:1/-1;background:#1e1e24;border-radius:6px;padding:.5rem .75rem;font-family:ui-monospace,SFMono-Regular,Menlo,monospace;font-size:.75rem;white-space:pre-wrap;overflow-x:auto;color:#a1a1aa}
.st-passed{color:var(--rag-green)}
.st-failed,.st-error{color:var(--rag-red)}
.st-skipped{color:var(--rag-amber)}
footer{padding:1rem 1.5rem;color:#71717a;font-size:.75rem;border-top:1px solid #2a2a32}
</style>
"##
    }

    fn template_body() -> &'static str {
        "<main id=\"app\"></main>\n"
    }

    fn template_script() -> &'static str {
        r#"<script>
const esc=s=>String(s).replace(/[&<>"]/g,c=>({"&":"&amp;","<":"&lt;",">":"&gt;",'"':"&quot;"}[c]));
const badge=s=>`<span class="badge rag-${s}">${s}</span>`;
const fmtCounts=c=>`${c.total} tests · ${c.total-c.failed-c.errors-c.skipped} passed · ${c.failed} failed · ${c.errors} errors · ${c.skipped} skipped`;
const app=document.getElementById('app');
app.innerHTML=DATA.categories.map(cat=>`
<section class="category">
<h2>${badge(cat.status)} ${esc(cat.name)}<span class="counts">${fmtCounts(cat.counts)}</span></h2>
${cat.suites.map(s=>`
<div class="suite">
<div class="suite-hdr" onclick="this.nextElementSibling.classList.toggle('open')">
${badge(s.status)}<span class="name">${esc(s.name)}</span>
<span class="time">${s.counts.total} tests · ${s.duration.toFixed(3)}s</span>
</div>
<div class="cases">
${s.cases.map(c=>`
<div class="case-row">
<span class="cname">${esc(c.name)}</span>
<span class="cstatus st-${c.status}">${c.status}</span>
<span class="ctime">${c.duration.toFixed(3)}s</span>
${c.message||c.detail?`<div class="case-detail">${esc(c.message||'')}${c.message&&c.detail?'\n':''}${esc(c.detail||'')}</div>`:''}
</div>`).join('')}
</div>
</div>`).join('')}
</section>`).join('');
</script>
"#
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}
