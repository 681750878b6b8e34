use crate::categories::ALL_CATEGORIES;

pub fn render_index(categories: &[String]) -> String {
    INDEX_HTML.replace("{{CATEGORY_OPTIONS}}", &category_options(categories))
}

fn category_options(categories: &[String]) -> String {
    categories
        .iter()
        .map(|category| {
            // The sentinel posts an empty value, which the API reads as "no filter".
            let value = if category == ALL_CATEGORIES { "" } else { category.as_str() };
            format!(
                r#"<option value="{}">{}</option>"#,
                escape_html(value),
                escape_html(category)
            )
        })
        .collect::<Vec<_>>()
        .join("\n          ")
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Sales Target Achievement</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --target: #2d7a4b;
      --actual: #2f5fd0;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1100px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: flex-end;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    select {
      font: inherit;
      padding: 10px 14px;
      border-radius: 999px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      background: white;
      color: var(--accent-2);
    }

    .card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      overflow-x: auto;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.4rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.92rem;
    }

    th {
      text-align: left;
      font-size: 0.78rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: #8b857d;
      padding: 8px 10px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.12);
    }

    td {
      padding: 8px 10px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.06);
    }

    td.num, th.num {
      text-align: right;
    }

    #summary-table tbody tr {
      cursor: pointer;
    }

    #summary-table tbody tr:hover {
      background: rgba(255, 107, 74, 0.06);
    }

    #summary-table tbody tr.active {
      background: rgba(47, 95, 208, 0.12);
    }

    #summary-table tbody tr.active td.pct::after {
      content: '   \25C4';
    }

    #summary-table tbody tr.exceeded {
      font-style: italic;
      font-weight: 600;
    }

    tfoot td {
      font-weight: 600;
      border-bottom: none;
      border-top: 2px solid rgba(47, 72, 88, 0.2);
    }

    #chart {
      width: 100%;
      height: 300px;
      display: block;
    }

    #chart text {
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .chart-line {
      fill: none;
      stroke-width: 3;
    }

    .chart-line.actual {
      stroke: var(--actual);
    }

    .chart-line.target {
      stroke: var(--target);
    }

    .chart-line.projected {
      stroke: var(--accent);
      stroke-width: 2;
      stroke-dasharray: 5 5;
    }

    .chart-point {
      fill: white;
      stroke: var(--actual);
      stroke-width: 2;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .legend {
      display: flex;
      flex-wrap: wrap;
      gap: 18px;
      font-size: 0.88rem;
      color: #5f5c57;
    }

    .legend span::before {
      content: '';
      display: inline-block;
      width: 18px;
      height: 3px;
      margin-right: 6px;
      vertical-align: middle;
    }

    .legend .actual::before { background: var(--actual); }
    .legend .target::before { background: var(--target); }
    .legend .projected::before { background: var(--accent); }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="warn"] {
      color: #a86a12;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Sales Target Achievement</h1>
        <p class="subtitle">Actual net sales against each store's projected sales for the period.</p>
      </div>
      <label>
        <select id="store-group" aria-label="Business group">
          {{CATEGORY_OPTIONS}}
        </select>
      </label>
    </header>

    <section class="card">
      <table id="summary-table">
        <thead>
          <tr>
            <th></th>
            <th>Store Name</th>
            <th class="num">Projected Sales</th>
            <th>Starting Date</th>
            <th>Target Date</th>
            <th>As Of Date</th>
            <th class="num">Actual Sales</th>
            <th class="num">Achievement (%) on Projected Sales</th>
          </tr>
        </thead>
        <tbody></tbody>
      </table>
    </section>

    <section class="panel">
      <div class="stat">
        <span class="label">Store</span>
        <span id="store-label" class="value">--</span>
      </div>
      <div class="stat">
        <span class="label">Target Date</span>
        <span id="period-end-label" class="value">--</span>
      </div>
      <div class="stat">
        <span class="label">Projected Sales</span>
        <span id="projected-label" class="value">--</span>
      </div>
    </section>

    <section class="card">
      <div class="legend">
        <span class="actual">Running Total</span>
        <span class="target">Daily Target</span>
        <span class="projected" id="projected-legend">Sales Target</span>
      </div>
      <svg id="chart" viewBox="0 0 720 300" aria-label="Running total against target" role="img"></svg>
    </section>

    <section class="card">
      <table id="detail-table">
        <thead>
          <tr>
            <th>Date</th>
            <th class="num">Daily Net Sales</th>
            <th class="num">Running Daily Target</th>
            <th class="num">Running Total Sales</th>
            <th class="num">Achievement (%) on Projected Sales</th>
          </tr>
        </thead>
        <tbody></tbody>
        <tfoot></tfoot>
      </table>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const groupEl = document.getElementById('store-group');
    const summaryBody = document.querySelector('#summary-table tbody');
    const detailBody = document.querySelector('#detail-table tbody');
    const detailFoot = document.querySelector('#detail-table tfoot');
    const storeLabelEl = document.getElementById('store-label');
    const periodEndEl = document.getElementById('period-end-label');
    const projectedEl = document.getElementById('projected-label');
    const projectedLegendEl = document.getElementById('projected-legend');
    const chartEl = document.getElementById('chart');
    const statusEl = document.getElementById('status');

    // The page's only mutable state. Each load takes a ticket; a response is
    // applied only if its ticket is still the latest one issued.
    const view = {
      summaryTicket: 0,
      salesTicket: 0,
      selected: null
    };

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const cell = (text, className) => {
      const td = document.createElement('td');
      td.textContent = text;
      if (className) {
        td.className = className;
      }
      return td;
    };

    const fetchJson = async (url) => {
      const res = await fetch(url);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || `Request failed (${res.status})`);
      }
      return res.json();
    };

    const formatAxisValue = (value) => {
      if (Math.abs(value) >= 1000) {
        return `${(value / 1000).toFixed(1).replace(/\.0$/, '')}k`;
      }
      return Math.round(value).toString();
    };

    const renderChart = (series) => {
      if (!series.labels.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data</text>';
        return;
      }

      const width = 720;
      const height = 300;
      const paddingX = 52;
      const paddingY = 34;
      const top = 20;

      const values = [
        ...series.running_total.filter((value) => value !== null),
        ...series.daily_target,
        ...series.target_line
      ];
      const min = 0;
      let max = Math.max(0, ...values);
      if (max === min) {
        max = 1;
      }

      const count = series.labels.length;
      const xStep = count > 1 ? (width - paddingX * 2) / (count - 1) : 0;
      const scaleY = (height - top - paddingY) / (max - min);
      const x = (index) => paddingX + index * xStep;
      const y = (value) => height - paddingY - (value - min) * scaleY;

      // A null value lifts the pen, so gaps stay gaps.
      const linePath = (points) => {
        let path = '';
        let penDown = false;
        points.forEach((value, index) => {
          if (value === null || value === undefined) {
            penDown = false;
            return;
          }
          path += `${penDown ? 'L' : 'M'} ${x(index).toFixed(2)} ${y(value).toFixed(2)} `;
          penDown = true;
        });
        return path.trim();
      };

      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = min + ((max - min) * i) / ticks;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${paddingX - 10}" y="${yPos + 4}" text-anchor="end">${formatAxisValue(value)}</text>`;
      }

      const labelEvery = Math.max(1, Math.ceil(count / 12));
      const xLabels = series.labels
        .map((label, index) => {
          if (index % labelEvery !== 0) {
            return '';
          }
          return `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 18}" text-anchor="middle">${label}</text>`;
        })
        .join('');

      const circles = series.running_total
        .map((value, index) => {
          if (value === null) {
            return '';
          }
          const pct = series.percent_achieved[index];
          const title = `Running Total: ${value}, Achievement: ${pct}%`;
          return `<circle class="chart-point" cx="${x(index)}" cy="${y(value)}" r="4"><title>${title}</title></circle>`;
        })
        .join('');

      chartEl.setAttribute('viewBox', `0 0 ${width} ${height}`);
      chartEl.innerHTML = `
        ${grid}
        <path class="chart-line projected" d="${linePath(series.target_line)}" />
        <path class="chart-line target" d="${linePath(series.daily_target)}" />
        <path class="chart-line actual" d="${linePath(series.running_total)}" />
        ${circles}
        ${xLabels}
      `;
    };

    const renderDetail = (sales) => {
      detailBody.innerHTML = '';
      sales.rows.forEach((row) => {
        const tr = document.createElement('tr');
        tr.append(
          cell(row.date_label),
          cell(row.net_sales, 'num'),
          cell(row.daily_target, 'num'),
          cell(row.running_total, 'num'),
          cell(row.percent, 'num')
        );
        detailBody.appendChild(tr);
      });

      detailFoot.innerHTML = '';
      const totals = document.createElement('tr');
      totals.append(
        cell(sales.totals.date_label, 'num'),
        cell(sales.totals.net_sales, 'num'),
        cell(sales.totals.daily_target, 'num'),
        cell(sales.totals.running_total, 'num'),
        cell(sales.totals.percent, 'num')
      );
      detailFoot.appendChild(totals);
    };

    const renderSales = (sales) => {
      storeLabelEl.textContent = sales.store_name || '--';
      periodEndEl.textContent = sales.period_end_label || '--';
      projectedEl.textContent = sales.projected_label;
      projectedLegendEl.textContent = `Sales Target: ${sales.projected_label}`;
      renderChart(sales.series);
      renderDetail(sales);
      if (!sales.has_data) {
        setStatus('No data available for this selection.', 'warn');
      }
    };

    const loadSales = async (store, target) => {
      const ticket = ++view.salesTicket;
      setStatus('Loading...', 'info');
      try {
        const params = new URLSearchParams({ store, target });
        const sales = await fetchJson(`/api/sales?${params}`);
        if (ticket !== view.salesTicket) {
          return;
        }
        view.selected = { store, target };
        setStatus('', '');
        renderSales(sales);
      } catch (err) {
        if (ticket === view.salesTicket) {
          setStatus(err.message, 'error');
        }
      }
    };

    const highlightRow = (row) => {
      summaryBody.querySelectorAll('tr').forEach((tr) => tr.classList.remove('active'));
      row.classList.add('active');
    };

    const renderSummaries = (rows) => {
      summaryBody.innerHTML = '';
      rows.forEach((row) => {
        const tr = document.createElement('tr');
        tr.dataset.store = row.store_name;
        tr.dataset.target = row.target_date;
        if (row.exceeded) {
          tr.classList.add('exceeded');
        }
        tr.append(
          cell(String(row.rank)),
          cell(row.store_name),
          cell(row.projected_label, 'num'),
          cell(row.period_start),
          cell(row.target_date),
          cell(row.as_of_date),
          cell(row.total_net_label, 'num'),
          cell(row.percent_label, 'num pct')
        );
        summaryBody.appendChild(tr);
      });
    };

    const loadSummaries = async (group) => {
      const ticket = ++view.summaryTicket;
      try {
        const params = new URLSearchParams({ group, order: 'recent' });
        const rows = await fetchJson(`/api/summaries?${params}`);
        if (ticket !== view.summaryTicket) {
          return;
        }
        renderSummaries(rows);
        const first = summaryBody.querySelector('tr');
        if (first) {
          highlightRow(first);
          await loadSales(first.dataset.store, first.dataset.target);
        } else {
          setStatus('No data available in the sales source.', 'warn');
        }
      } catch (err) {
        if (ticket === view.summaryTicket) {
          setStatus(err.message, 'error');
        }
      }
    };

    summaryBody.addEventListener('click', (event) => {
      const row = event.target.closest('tr');
      if (!row) {
        return;
      }
      highlightRow(row);
      loadSales(row.dataset.store || '', row.dataset.target || '');
    });

    groupEl.addEventListener('change', () => loadSummaries(groupEl.value));

    loadSummaries(groupEl.value);
  </script>
</body>
</html>
"#;
