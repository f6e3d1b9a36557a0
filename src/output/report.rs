use super::OutputRecord;

fn json_for_script_tag(value: &str) -> String {
    value.replace("</", "<\\/")
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_rows(records: &[OutputRecord]) -> String {
    let mut rows = String::new();
    for r in records {
        rows.push_str(&format!(
            "        <tr data-key=\"{key}\"><td><img class=\"image\" src=\"{src}\" alt=\"\"/></td><td>{first}</td><td>{last}</td></tr>\n",
            key = escape_html(&r.key),
            src = escape_html(&r.headshot_url),
            first = escape_html(&r.first_name),
            last = escape_html(&r.last_name),
        ));
    }
    rows
}

/// Standalone page: the table is pre-rendered so it reads without scripts;
/// the embedded script wires up the same search/shuffle/sort controls as the
/// terminal session.
pub fn render_html(records: &[OutputRecord]) -> Vec<u8> {
    let json = serde_json::to_string(records).unwrap_or_else(|_| "[]".to_string());
    let json = json_for_script_tag(&json);
    let rows = render_rows(records);

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <title>Name Game</title>
  <style>
    body {{ font-family: sans-serif; margin: 2rem; }}
    .controls {{ display: flex; gap: 0.5rem; margin-bottom: 1rem; }}
    .list-container {{ border-collapse: collapse; }}
    .list-container th, .list-container td {{ padding: 0.25rem 0.75rem; text-align: left; }}
    .image {{ width: 64px; height: 64px; object-fit: cover; }}
  </style>
</head>
<body>
  <script type="application/json" id="records-data">{json}</script>
  <div class="app-container">
    <div class="controls">
      <input id="search" type="search" placeholder="Search"/>
      <button id="shuffle" type="button">Shuffle</button>
      <button id="sort-first" type="button">Sort (First Name)</button>
      <button id="sort-last" type="button">Sort (Last Name)</button>
    </div>
    <table class="list-container">
      <thead>
        <tr><th>Thumbnail</th><th>First Name</th><th>Last Name</th></tr>
      </thead>
      <tbody id="rows">
{rows}      </tbody>
    </table>
  </div>
  <script>
    (function () {{
      const full = JSON.parse(document.getElementById("records-data").textContent);
      const body = document.getElementById("rows");
      function render(list) {{
        body.replaceChildren(...list.map(function (p) {{
          const tr = document.createElement("tr");
          const img = document.createElement("img");
          img.className = "image";
          img.src = p.headshot_url;
          const cells = [img, p.first_name, p.last_name].map(function (v) {{
            const td = document.createElement("td");
            td.append(v);
            return td;
          }});
          tr.append(...cells);
          return tr;
        }}));
      }}
      function sortBy(prop) {{
        return full.slice().sort(function (a, b) {{
          return a[prop] < b[prop] ? -1 : a[prop] > b[prop] ? 1 : 0;
        }});
      }}
      function shuffle() {{
        const out = full.slice();
        for (let i = out.length - 1; i > 0; i -= 1) {{
          const j = Math.floor(Math.random() * (i + 1));
          [out[i], out[j]] = [out[j], out[i]];
        }}
        return out;
      }}
      document.getElementById("search").addEventListener("input", function (e) {{
        const q = e.target.value.toLowerCase();
        render(full.filter(function (p) {{
          return p.first_name.toLowerCase().includes(q) || p.last_name.toLowerCase().includes(q);
        }}));
      }});
      document.getElementById("shuffle").addEventListener("click", function () {{ render(shuffle()); }});
      document.getElementById("sort-first").addEventListener("click", function () {{ render(sortBy("first_name")); }});
      document.getElementById("sort-last").addEventListener("click", function () {{ render(sortBy("last_name")); }});
    }})();
  </script>
</body>
</html>
"####
    );
    html.into_bytes()
}
