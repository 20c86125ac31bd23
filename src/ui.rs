use crate::models::WindowReport;
use crate::window::TimeWindow;
use std::time::Duration;

pub fn render_index(report: &WindowReport, poll_interval: Duration) -> String {
    let latest = &report.latest;
    let error = report.status.error.as_deref().unwrap_or("");

    INDEX_HTML
        .replace("{{WINDOW_OPTIONS}}", &window_options(report.window))
        .replace("{{WINDOW}}", report.window.as_str())
        .replace("{{TEMP}}", &escape(&latest.temperature))
        .replace("{{HUMID}}", &escape(&latest.humidity))
        .replace("{{DOOR}}", latest.door_text())
        .replace("{{IMAGE}}", &escape(&latest.image_reading))
        .replace("{{UPDATED}}", &escape(latest.label.as_deref().unwrap_or("--")))
        .replace("{{ERROR}}", &escape(error))
        .replace("{{POLL_MS}}", &poll_interval.as_millis().to_string())
}

fn window_options(selected: TimeWindow) -> String {
    TimeWindow::ALL
        .iter()
        .map(|window| {
            let marker = if *window == selected { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                window.as_str(),
                marker,
                window.label()
            )
        })
        .collect()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Sensor Dashboard</title>
  <style>
    :root {
      --bg: #eef2f5;
      --ink: #1f2a33;
      --muted: #6b7782;
      --card: #ffffff;
      --temp: #e4572e;
      --humid: #2e86ab;
      --door: #7b5ea7;
      --image: #3f8f5b;
      --shadow: 0 18px 40px rgba(31, 42, 51, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", Arial, sans-serif;
      padding: 28px 18px 48px;
    }

    .app {
      width: min(1080px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: flex-end;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.7rem, 3vw, 2.3rem);
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    select {
      font: inherit;
      padding: 8px 12px;
      border-radius: 10px;
      border: 1px solid rgba(31, 42, 51, 0.2);
      background: white;
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .card {
      background: var(--card);
      border-radius: 16px;
      padding: 18px;
      box-shadow: var(--shadow);
      display: grid;
      gap: 6px;
      border-top: 4px solid var(--accent, var(--ink));
    }

    .card .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .card .value {
      font-size: 1.9rem;
      font-weight: 600;
    }

    .card.temp { --accent: var(--temp); }
    .card.humid { --accent: var(--humid); }
    .card.door { --accent: var(--door); }
    .card.image { --accent: var(--image); }

    .value.door-open {
      color: var(--temp);
    }

    .panel {
      background: var(--card);
      border-radius: 18px;
      box-shadow: var(--shadow);
      padding: 20px;
      display: grid;
      gap: 16px;
    }

    .toolbar {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      gap: 12px;
    }

    .tabs, .modes {
      display: flex;
      gap: 4px;
      padding: 4px;
      background: rgba(31, 42, 51, 0.06);
      border-radius: 999px;
    }

    .tab, .mode {
      appearance: none;
      border: none;
      background: transparent;
      border-radius: 999px;
      padding: 8px 14px;
      font: inherit;
      font-size: 0.9rem;
      font-weight: 600;
      color: var(--muted);
      cursor: pointer;
    }

    .tab.active, .mode.active {
      background: white;
      color: var(--ink);
      box-shadow: 0 6px 14px rgba(31, 42, 51, 0.12);
    }

    .modes[hidden] {
      display: none;
    }

    #chart {
      width: 100%;
      height: 300px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke-width: 2.5;
    }

    .chart-grid {
      stroke: rgba(31, 42, 51, 0.1);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    .metrics {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 12px;
    }

    .metric {
      background: rgba(31, 42, 51, 0.04);
      border-radius: 12px;
      padding: 12px 14px;
    }

    .metric .label {
      display: block;
      font-size: 0.8rem;
      color: var(--muted);
    }

    .metric .value {
      font-size: 1.2rem;
      font-weight: 600;
    }

    .table-wrap {
      max-height: 420px;
      overflow: auto;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.92rem;
    }

    th, td {
      text-align: left;
      padding: 8px 10px;
      border-bottom: 1px solid rgba(31, 42, 51, 0.08);
    }

    th {
      position: sticky;
      top: 0;
      background: white;
    }

    .error {
      padding: 14px 16px;
      border-radius: 12px;
      background: #fdecea;
      color: #a8321f;
      font-weight: 600;
    }

    .error:empty {
      display: none;
    }

    .hint {
      margin: 0;
      color: var(--muted);
      font-size: 0.88rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Sensor Dashboard</h1>
        <p class="subtitle">Latest reading: <span id="updated">{{UPDATED}}</span></p>
      </div>
      <label>
        <span class="hint">Time range</span>
        <select id="window">{{WINDOW_OPTIONS}}</select>
      </label>
    </header>

    <section class="cards">
      <div class="card temp">
        <span class="label">Temperature</span>
        <span class="value"><span id="temp">{{TEMP}}</span> &deg;C</span>
      </div>
      <div class="card humid">
        <span class="label">Humidity</span>
        <span class="value"><span id="humid">{{HUMID}}</span> %</span>
      </div>
      <div class="card door">
        <span class="label">Door</span>
        <span class="value" id="door">{{DOOR}}</span>
      </div>
      <div class="card image">
        <span class="label">Image sensor</span>
        <span class="value" id="image">{{IMAGE}}</span>
      </div>
    </section>

    <div class="error" id="error">{{ERROR}}</div>

    <section class="panel">
      <div class="toolbar">
        <div class="tabs" role="tablist">
          <button class="tab active" type="button" data-tab="temperature" role="tab" aria-selected="true">Temperature</button>
          <button class="tab" type="button" data-tab="humidity" role="tab" aria-selected="false">Humidity</button>
          <button class="tab" type="button" data-tab="door" role="tab" aria-selected="false">Door</button>
          <button class="tab" type="button" data-tab="image" role="tab" aria-selected="false">Image</button>
          <button class="tab" type="button" data-tab="table" role="tab" aria-selected="false">Table</button>
        </div>
        <div class="modes" id="modes">
          <button class="mode active" type="button" data-mode="single">Single</button>
          <button class="mode" type="button" data-mode="combined">Temperature + humidity</button>
        </div>
      </div>

      <div id="chart-view">
        <svg id="chart" viewBox="0 0 720 300" aria-label="Sensor chart" role="img"></svg>
        <div class="metrics" id="metrics"></div>
      </div>

      <div class="table-wrap" id="table-view" hidden>
        <table>
          <thead>
            <tr>
              <th>Time</th>
              <th>Temperature (&deg;C)</th>
              <th>Humidity (%)</th>
              <th>Door</th>
              <th>Image</th>
            </tr>
          </thead>
          <tbody id="table-body"></tbody>
        </table>
      </div>
    </section>

    <p class="hint">Readings refresh every few seconds. If the sensor feed is unreachable the last good data stays on screen.</p>
  </main>

  <script>
    const POLL_MS = {{POLL_MS}};
    const SERIES = {
      temperature: { label: 'Temperature', color: 'var(--temp)', unit: '°C', pick: (r) => r.temperature },
      humidity: { label: 'Humidity', color: 'var(--humid)', unit: '%', pick: (r) => r.humidity },
      door: { label: 'Door open', color: 'var(--door)', unit: '', pick: (r) => (r.door_status === 'open' ? 1 : 0) },
      image: { label: 'Image reading', color: 'var(--image)', unit: '', pick: (r) => r.image_reading }
    };

    const windowEl = document.getElementById('window');
    const errorEl = document.getElementById('error');
    const chartEl = document.getElementById('chart');
    const chartView = document.getElementById('chart-view');
    const tableView = document.getElementById('table-view');
    const tableBody = document.getElementById('table-body');
    const metricsEl = document.getElementById('metrics');
    const modesEl = document.getElementById('modes');
    const tabs = Array.from(document.querySelectorAll('.tab'));
    const modes = Array.from(document.querySelectorAll('.mode'));

    let report = null;
    let activeTab = 'temperature';
    let displayMode = 'single';
    let selectedWindow = '{{WINDOW}}';
    let requestId = 0;

    const fmt = (value) =>
      typeof value === 'number' && Number.isFinite(value) ? value.toFixed(1) : '--';

    const escapeHtml = (text) =>
      String(text).replace(/[&<>"']/g, (ch) => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;' })[ch]);

    const renderChart = (series, readings) => {
      const lines = series
        .map((key) => ({
          key,
          points: readings
            .map((reading, index) => ({ index, value: SERIES[key].pick(reading) }))
            .filter((point) => typeof point.value === 'number')
        }))
        .filter((line) => line.points.length);

      if (!lines.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No readings in this range</text>';
        return;
      }

      const width = 720;
      const height = 300;
      const padX = 48;
      const padY = 36;
      const top = 20;

      const values = lines.flatMap((line) => line.points.map((point) => point.value));
      let min = Math.min(...values);
      let max = Math.max(...values);
      if (min === max) {
        min -= 1;
        max += 1;
      }

      const range = max - min;
      const count = readings.length;
      const xStep = count > 1 ? (width - padX * 2) / (count - 1) : 0;
      const x = (index) => padX + index * xStep;
      const y = (value) => height - padY - ((value - min) * (height - top - padY)) / range;

      let grid = '';
      for (let i = 0; i <= 4; i += 1) {
        const value = min + (range * i) / 4;
        grid += `<line class="chart-grid" x1="${padX}" y1="${y(value)}" x2="${width - padX}" y2="${y(value)}" />`;
        grid += `<text class="chart-label" x="${padX - 8}" y="${y(value) + 4}" text-anchor="end">${fmt(value)}</text>`;
      }

      const labelEvery = Math.max(1, Math.ceil(count / 6));
      const xLabels = readings
        .map((reading, index) =>
          index % labelEvery === 0
            ? `<text class="chart-label" x="${x(index)}" y="${height - padY + 18}" text-anchor="middle">${escapeHtml(reading.label)}</text>`
            : ''
        )
        .join('');

      const paths = lines
        .map((line) => {
          const d = line.points
            .map((point, i) => `${i === 0 ? 'M' : 'L'} ${x(point.index).toFixed(2)} ${y(point.value).toFixed(2)}`)
            .join(' ');
          return `<path class="chart-line" style="stroke: ${SERIES[line.key].color}" d="${d}" />`;
        })
        .join('');

      chartEl.innerHTML = `${grid}${paths}${xLabels}`;
    };

    const renderMetrics = (key) => {
      const stats = report.stats;
      const metric = (label, value) =>
        `<div class="metric"><span class="label">${label}</span><span class="value">${value}</span></div>`;

      if (key === 'door') {
        metricsEl.innerHTML = metric('Readings', stats.count) + metric('Door open', stats.door_open_count);
        return;
      }
      if (key === 'image') {
        metricsEl.innerHTML = metric('Readings', stats.count) + metric('Latest image reading', fmt(stats.latest_image_reading));
        return;
      }
      const series = stats[key];
      const unit = SERIES[key].unit;
      metricsEl.innerHTML =
        metric(`Min ${unit}`, fmt(series && series.min)) +
        metric(`Max ${unit}`, fmt(series && series.max)) +
        metric(`Average ${unit}`, fmt(series && series.avg)) +
        metric('Readings', stats.count);
    };

    const renderTable = (readings) => {
      if (!readings.length) {
        tableBody.innerHTML = '<tr><td colspan="5">No readings in this range</td></tr>';
        return;
      }
      tableBody.innerHTML = readings
        .slice()
        .reverse()
        .map(
          (r) =>
            `<tr><td>${escapeHtml(r.label)}</td><td>${fmt(r.temperature)}</td><td>${fmt(r.humidity)}</td><td>${r.door_status}</td><td>${fmt(r.image_reading)}</td></tr>`
        )
        .join('');
    };

    const renderSummary = () => {
      const latest = report.latest;
      document.getElementById('temp').textContent = latest.temperature;
      document.getElementById('humid').textContent = latest.humidity;
      document.getElementById('image').textContent = latest.image_reading;
      document.getElementById('updated').textContent = latest.label || '--';
      const doorEl = document.getElementById('door');
      doorEl.textContent = latest.door_status || '--';
      doorEl.classList.toggle('door-open', latest.door_status === 'open');
    };

    const render = () => {
      if (!report) {
        return;
      }
      renderSummary();
      errorEl.textContent = report.status.error || '';

      const failedEmpty = Boolean(report.status.error) && report.status.reading_count === 0;
      const isTable = activeTab === 'table';
      chartView.hidden = isTable || failedEmpty;
      tableView.hidden = !isTable || failedEmpty;
      modesEl.hidden = activeTab !== 'temperature' && activeTab !== 'humidity';

      if (failedEmpty) {
        return;
      }
      if (isTable) {
        renderTable(report.readings);
        return;
      }
      const series =
        displayMode === 'combined' && !modesEl.hidden ? ['temperature', 'humidity'] : [activeTab];
      renderChart(series, report.readings);
      renderMetrics(activeTab);
    };

    const load = async () => {
      const id = ++requestId;
      try {
        const res = await fetch(`/api/readings?window=${encodeURIComponent(selectedWindow)}`);
        if (!res.ok) {
          throw new Error(await res.text());
        }
        const body = await res.json();
        if (id !== requestId) {
          return;
        }
        report = body;
        render();
      } catch (err) {
        if (id === requestId) {
          errorEl.textContent = 'Unable to reach the dashboard server.';
        }
      }
    };

    tabs.forEach((button) => {
      button.addEventListener('click', () => {
        activeTab = button.dataset.tab;
        tabs.forEach((tab) => {
          const active = tab === button;
          tab.classList.toggle('active', active);
          tab.setAttribute('aria-selected', String(active));
        });
        render();
      });
    });

    modes.forEach((button) => {
      button.addEventListener('click', () => {
        displayMode = button.dataset.mode;
        modes.forEach((mode) => mode.classList.toggle('active', mode === button));
        render();
      });
    });

    windowEl.addEventListener('change', () => {
      selectedWindow = windowEl.value;
      load();
    });

    load();
    setInterval(load, POLL_MS);
  </script>
</body>
</html>
"#;
