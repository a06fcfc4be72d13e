use chrono::{Datelike, NaiveDate};

pub fn render_index(today: NaiveDate) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &today.to_string())
        .replace("{{YEAR}}", &today.year().to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>EA Subscription Manager</title>
  <style>
    :root {
      --bg: #0b1120;
      --panel: #0f172a;
      --panel-edge: #1e293b;
      --ink: #e2e8f0;
      --muted: #64748b;
      --accent: #3b82f6;
      --ok: #10b981;
      --bad: #f43f5e;
      --shadow: 0 18px 48px rgba(2, 6, 23, 0.55);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, #13203d, transparent 55%), var(--bg);
      color: var(--ink);
      font-family: 'Segoe UI', 'Helvetica Neue', sans-serif;
      display: flex;
      flex-direction: column;
    }

    header.top {
      position: sticky;
      top: 0;
      z-index: 10;
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 16px 28px;
      background: rgba(15, 23, 42, 0.85);
      backdrop-filter: blur(10px);
      border-bottom: 1px solid var(--panel-edge);
    }

    .brand h1 {
      margin: 0;
      font-size: 1.15rem;
      letter-spacing: 0.04em;
    }

    .brand p {
      margin: 2px 0 0;
      font-size: 0.65rem;
      letter-spacing: 0.22em;
      text-transform: uppercase;
      color: var(--muted);
    }

    nav {
      display: flex;
      gap: 8px;
      align-items: center;
    }

    nav button {
      background: transparent;
      border: none;
      color: var(--muted);
      padding: 9px 16px;
      border-radius: 10px;
      font-size: 0.9rem;
      font-weight: 600;
      cursor: pointer;
      transition: background 150ms ease, color 150ms ease;
    }

    nav button:hover {
      color: var(--ink);
    }

    nav button.active {
      background: var(--accent);
      color: white;
    }

    main {
      flex: 1;
      width: min(1180px, 100%);
      margin: 0 auto;
      padding: 32px 24px 56px;
    }

    section.view {
      display: none;
    }

    section.view.current {
      display: block;
    }

    h2 {
      margin: 0 0 6px;
      font-size: 1.7rem;
    }

    .lede {
      margin: 0 0 24px;
      color: var(--muted);
    }

    .card {
      background: var(--panel);
      border: 1px solid var(--panel-edge);
      border-radius: 18px;
      padding: 22px;
      box-shadow: var(--shadow);
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.92rem;
    }

    th {
      text-align: left;
      padding: 10px 12px;
      color: var(--muted);
      font-size: 0.72rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      border-bottom: 1px solid var(--panel-edge);
    }

    td {
      padding: 12px;
      border-bottom: 1px solid rgba(30, 41, 59, 0.6);
    }

    tr:last-child td {
      border-bottom: none;
    }

    .badge {
      display: inline-block;
      padding: 3px 10px;
      border-radius: 999px;
      font-size: 0.75rem;
      font-weight: 600;
    }

    .badge.active {
      color: var(--ok);
      background: rgba(16, 185, 129, 0.12);
    }

    .badge.inactive {
      color: var(--bad);
      background: rgba(244, 63, 94, 0.12);
    }

    .stat-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
      margin-bottom: 24px;
    }

    .stat .label {
      display: block;
      font-size: 0.72rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--muted);
      margin-bottom: 8px;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 700;
    }

    .admin-grid {
      display: grid;
      grid-template-columns: 2fr 1fr;
      gap: 20px;
      align-items: start;
    }

    .stack {
      display: grid;
      gap: 20px;
    }

    #chart {
      width: 100%;
      height: 280px;
      display: block;
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    .chart-grid-line {
      stroke: rgba(100, 116, 139, 0.2);
    }

    form.panel-form {
      display: grid;
      gap: 14px;
    }

    label.field {
      display: grid;
      gap: 6px;
      font-size: 0.72rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    input, select {
      background: #1e293b;
      border: 1px solid #334155;
      border-radius: 10px;
      padding: 11px 13px;
      color: var(--ink);
      font-size: 0.95rem;
    }

    input:focus, select:focus {
      outline: 2px solid rgba(59, 130, 246, 0.45);
      border-color: var(--accent);
    }

    .two-col {
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 12px;
    }

    button.primary {
      background: var(--accent);
      border: none;
      border-radius: 10px;
      color: white;
      font-weight: 700;
      font-size: 0.95rem;
      padding: 13px;
      cursor: pointer;
    }

    button.primary.green {
      background: #059669;
    }

    button.danger {
      background: transparent;
      border: 1px solid rgba(244, 63, 94, 0.4);
      color: var(--bad);
      border-radius: 8px;
      padding: 6px 12px;
      font-size: 0.8rem;
      cursor: pointer;
    }

    .form-error {
      color: var(--bad);
      font-size: 0.85rem;
      min-height: 1.1em;
      margin: 0;
    }

    .hint {
      color: var(--muted);
      font-size: 0.78rem;
      text-align: center;
      margin: 14px 0 0;
    }

    .login-wrap {
      display: flex;
      justify-content: center;
      padding: 48px 0;
    }

    .login-card {
      width: min(400px, 100%);
    }

    .audit-box {
      background: rgba(2, 6, 23, 0.5);
      border: 1px solid var(--panel-edge);
      border-radius: 12px;
      padding: 14px;
      font-size: 0.85rem;
      color: #94a3b8;
      font-style: italic;
      line-height: 1.5;
      min-height: 3em;
    }

    .audit-box.pending {
      font-style: normal;
      color: var(--muted);
      text-transform: uppercase;
      font-size: 0.7rem;
      letter-spacing: 0.18em;
      text-align: center;
      padding-top: 22px;
    }

    h3 {
      margin: 0 0 16px;
      font-size: 1.05rem;
    }

    footer {
      border-top: 1px solid var(--panel-edge);
      padding: 20px 28px;
      color: var(--muted);
      font-size: 0.78rem;
      display: flex;
      justify-content: space-between;
      flex-wrap: wrap;
      gap: 10px;
    }

    @media (max-width: 900px) {
      .admin-grid {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <header class="top">
    <div class="brand">
      <h1>EA PRO MANAGER</h1>
      <p>Subscription Suite</p>
    </div>
    <nav>
      <button id="nav-public" type="button">Public Status</button>
      <button id="nav-login" type="button">Admin Access</button>
      <button id="nav-admin" type="button" hidden>Dashboard</button>
      <button id="nav-logout" type="button" hidden title="Logout">Logout</button>
    </nav>
  </header>

  <main>
    <section id="view-public" class="view current">
      <h2>Account Status</h2>
      <p class="lede">Live monitoring of EA subscription slots as of {{DATE}}.</p>
      <div class="card">
        <table>
          <thead>
            <tr><th>Account</th><th>Package</th><th>Expires</th><th>Status</th></tr>
          </thead>
          <tbody id="public-rows"></tbody>
        </table>
      </div>
    </section>

    <section id="view-login" class="view">
      <div class="login-wrap">
        <div class="card login-card">
          <h2>System Login</h2>
          <p class="lede">Authorized personnel only.</p>
          <form id="login-form" class="panel-form">
            <label class="field">Username
              <input id="login-user" type="text" required placeholder="Enter username" />
            </label>
            <label class="field">Password
              <input id="login-pass" type="password" required placeholder="Password" />
            </label>
            <p id="login-error" class="form-error"></p>
            <button class="primary" type="submit">Sign In</button>
            <p class="hint">Demo credentials: admin / admin123</p>
          </form>
        </div>
      </div>
    </section>

    <section id="view-admin" class="view">
      <h2>Dashboard</h2>
      <p class="lede">Revenue, renewals and slot health at a glance.</p>

      <div class="stat-grid">
        <div class="card stat">
          <span class="label">Total Revenue</span>
          <span class="value" id="stat-total">--</span>
        </div>
        <div class="card stat">
          <span class="label">Active Accounts</span>
          <span class="value" id="stat-active">--</span>
        </div>
        <div class="card stat">
          <span class="label">Expiring Soon</span>
          <span class="value" id="stat-expiring">--</span>
        </div>
        <div class="card stat">
          <span class="label">This Month</span>
          <span class="value" id="stat-month">--</span>
        </div>
      </div>

      <div class="admin-grid">
        <div class="stack">
          <div class="card">
            <h3>Revenue Performance ({{YEAR}})</h3>
            <svg id="chart" viewBox="0 0 600 280" role="img" aria-label="Monthly revenue chart"></svg>
          </div>
          <div class="card">
            <h3>Subscriber Management</h3>
            <table>
              <thead>
                <tr><th>Account</th><th>Package</th><th>Expires</th><th>Status</th><th>Renewals</th><th></th></tr>
              </thead>
              <tbody id="admin-rows"></tbody>
            </table>
          </div>
        </div>

        <div class="stack">
          <div class="card">
            <h3>New Subscription</h3>
            <form id="renew-form" class="panel-form">
              <label class="field">Account ID
                <input id="renew-account" type="text" placeholder="EA-XXXX" />
              </label>
              <label class="field">Package ($)
                <input id="renew-package" type="number" step="any" value="22" />
              </label>
              <div class="two-col">
                <label class="field">Count
                  <input id="renew-count" type="number" min="1" value="1" />
                </label>
                <label class="field">Unit
                  <select id="renew-unit">
                    <option value="day">Day(s)</option>
                    <option value="week">Week(s)</option>
                    <option value="month" selected>Month(s)</option>
                  </select>
                </label>
              </div>
              <p id="renew-error" class="form-error"></p>
              <button class="primary green" type="submit">Add / Renew Account</button>
            </form>
          </div>
          <div class="card">
            <h3>Auditor</h3>
            <div id="audit-box" class="audit-box pending">Generating audit...</div>
          </div>
        </div>
      </div>
    </section>
  </main>

  <footer>
    <span>&copy; {{YEAR}} EA Subscription Management.</span>
    <span>Systems online &middot; {{DATE}}</span>
  </footer>

  <script>
    const views = {
      public: document.getElementById('view-public'),
      login: document.getElementById('view-login'),
      admin: document.getElementById('view-admin')
    };
    const navPublic = document.getElementById('nav-public');
    const navLogin = document.getElementById('nav-login');
    const navAdmin = document.getElementById('nav-admin');
    const navLogout = document.getElementById('nav-logout');
    const publicRows = document.getElementById('public-rows');
    const adminRows = document.getElementById('admin-rows');
    const auditBox = document.getElementById('audit-box');
    const chartEl = document.getElementById('chart');

    // session flag lives here and only here; the server keeps no session
    let isAdmin = false;
    let auditTimer = null;

    const money = (value) => '$' + (Math.round(value * 100) / 100).toLocaleString();

    const esc = (text) => String(text).replace(/[&<>"]/g, (c) => ({
      '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;'
    })[c]);

    const setView = (name) => {
      Object.entries(views).forEach(([key, el]) => {
        el.classList.toggle('current', key === name);
      });
      navPublic.classList.toggle('active', name === 'public');
      navLogin.classList.toggle('active', name === 'login');
      navAdmin.classList.toggle('active', name === 'admin');
      if (name === 'admin') {
        refreshAdmin();
      }
    };

    const applySession = () => {
      navLogin.hidden = isAdmin;
      navAdmin.hidden = !isAdmin;
      navLogout.hidden = !isAdmin;
    };

    const badge = (status) =>
      '<span class="badge ' + status + '">' + (status === 'active' ? 'Active' : 'Expired') + '</span>';

    const renderTables = (accounts) => {
      if (!accounts.length) {
        publicRows.innerHTML = '<tr><td colspan="4">No accounts on file.</td></tr>';
        adminRows.innerHTML = '<tr><td colspan="6">No accounts on file.</td></tr>';
        return;
      }

      publicRows.innerHTML = accounts.map((a) =>
        '<tr><td>' + esc(a.account) + '</td><td>' + esc(a.package) + '</td><td>' +
        esc(a.expire) + '</td><td>' + badge(a.status) + '</td></tr>'
      ).join('');

      adminRows.innerHTML = accounts.map((a) =>
        '<tr><td>' + esc(a.account) + '</td><td>' + esc(a.package) + '</td><td>' +
        esc(a.expire) + '</td><td>' + badge(a.status) + '</td><td>' + a.history.length +
        '</td><td><button class="danger" type="button" data-remove="' + esc(a.account) +
        '">Delete</button></td></tr>'
      ).join('');
    };

    const renderChart = (series) => {
      const width = 600;
      const height = 280;
      const padX = 40;
      const padY = 30;
      const top = 16;
      const max = Math.max(1, ...series.map((m) => m.revenue));
      const slot = (width - padX * 2) / series.length;
      const barW = slot * 0.58;
      const scale = (height - top - padY) / max;

      let grid = '';
      const ticks = 4;
      for (let i = 0; i <= ticks; i += 1) {
        const value = (max * i) / ticks;
        const y = height - padY - value * scale;
        grid += '<line class="chart-grid-line" x1="' + padX + '" y1="' + y +
          '" x2="' + (width - padX) + '" y2="' + y + '" />';
        grid += '<text class="chart-label" x="' + (padX - 8) + '" y="' + (y + 4) +
          '" text-anchor="end">$' + Math.round(value) + '</text>';
      }

      const bars = series.map((m, i) => {
        const h = m.revenue * scale;
        const x = padX + i * slot + (slot - barW) / 2;
        const y = height - padY - h;
        const fill = m.revenue > 0 ? '#3b82f6' : '#1e293b';
        const minH = m.revenue > 0 ? h : 2;
        return '<rect x="' + x.toFixed(1) + '" y="' + (m.revenue > 0 ? y.toFixed(1) : height - padY - 2) +
          '" width="' + barW.toFixed(1) + '" height="' + Math.max(minH, 1).toFixed(1) +
          '" rx="3" fill="' + fill + '" />';
      }).join('');

      const labels = series.map((m, i) => {
        const x = padX + i * slot + slot / 2;
        return '<text class="chart-label" x="' + x.toFixed(1) + '" y="' + (height - padY + 16) +
          '" text-anchor="middle">' + m.month + '</text>';
      }).join('');

      chartEl.innerHTML = grid + bars + labels;
    };

    const loadAccounts = async () => {
      const res = await fetch('/api/accounts');
      if (!res.ok) {
        throw new Error('Unable to load accounts');
      }
      renderTables(await res.json());
    };

    const loadStats = async () => {
      const res = await fetch('/api/stats');
      if (!res.ok) {
        throw new Error('Unable to load stats');
      }
      const stats = await res.json();
      document.getElementById('stat-total').textContent = money(stats.total_revenue);
      document.getElementById('stat-active').textContent = stats.active_accounts;
      document.getElementById('stat-expiring').textContent = stats.expiring_soon;
      document.getElementById('stat-month').textContent = money(stats.this_month_revenue);
    };

    const loadChart = async () => {
      const res = await fetch('/api/chart');
      if (!res.ok) {
        throw new Error('Unable to load chart');
      }
      renderChart(await res.json());
    };

    const pollAudit = async () => {
      const res = await fetch('/api/audit');
      if (!res.ok) {
        return;
      }
      const audit = await res.json();
      if (audit.status === 'ready') {
        auditBox.classList.remove('pending');
        auditBox.textContent = '"' + audit.text + '"';
        clearInterval(auditTimer);
        auditTimer = null;
      } else if (audit.text) {
        auditBox.classList.remove('pending');
        auditBox.textContent = '"' + audit.text + '" (refreshing...)';
      } else {
        auditBox.classList.add('pending');
        auditBox.textContent = 'Generating audit...';
      }
    };

    const watchAudit = () => {
      if (auditTimer) {
        clearInterval(auditTimer);
      }
      pollAudit();
      auditTimer = setInterval(pollAudit, 1500);
    };

    const refreshAdmin = () => {
      Promise.all([loadAccounts(), loadStats(), loadChart()]).catch(() => {});
      watchAudit();
    };

    navPublic.addEventListener('click', () => setView('public'));
    navLogin.addEventListener('click', () => setView('login'));
    navAdmin.addEventListener('click', () => setView('admin'));
    navLogout.addEventListener('click', () => {
      isAdmin = false;
      applySession();
      setView('public');
    });

    document.getElementById('login-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const errorEl = document.getElementById('login-error');
      errorEl.textContent = '';
      const res = await fetch('/api/login', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({
          username: document.getElementById('login-user').value,
          password: document.getElementById('login-pass').value
        })
      });
      const body = res.ok ? await res.json() : { ok: false };
      if (body.ok) {
        isAdmin = true;
        applySession();
        setView('admin');
        document.getElementById('login-pass').value = '';
      } else {
        errorEl.textContent = 'Invalid username or password';
      }
    });

    document.getElementById('renew-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const errorEl = document.getElementById('renew-error');
      errorEl.textContent = '';
      const res = await fetch('/api/accounts', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({
          account: document.getElementById('renew-account').value,
          package: document.getElementById('renew-package').value,
          count: parseInt(document.getElementById('renew-count').value, 10) || 0,
          unit: document.getElementById('renew-unit').value
        })
      });
      if (!res.ok) {
        const body = await res.json().catch(() => ({}));
        errorEl.textContent = body.error || 'Request failed';
        return;
      }
      document.getElementById('renew-account').value = '';
      refreshAdmin();
    });

    adminRows.addEventListener('click', async (event) => {
      const account = event.target.dataset && event.target.dataset.remove;
      if (!account) {
        return;
      }
      if (!window.confirm('Delete ' + account + '?')) {
        return;
      }
      await fetch('/api/accounts/remove', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ account })
      });
      refreshAdmin();
    });

    applySession();
    loadAccounts().catch(() => {
      publicRows.innerHTML = '<tr><td colspan="4">Unable to load accounts.</td></tr>';
    });
  </script>
</body>
</html>
"#;
