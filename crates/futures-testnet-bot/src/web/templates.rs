/*
[INPUT]:  Form values, notices, and page bodies
[OUTPUT]: Escaped HTML strings
[POS]:    Web layer - HTML rendering
[UPDATE]: When changing page layout or form fields
*/

use std::fmt::Write as _;

use binance_futures_adapter::AccountAsset;

use super::handlers::OrderForm;

const STYLE: &str = "body{font-family:sans-serif;max-width:640px;margin:2rem auto;padding:0 1rem}\
label{display:block;margin-top:.75rem}input,select{width:100%;padding:.3rem}\
button{margin-top:1rem;padding:.5rem 1.5rem}.notice{padding:.75rem;margin:1rem 0;border-radius:4px}\
.success{background:#e6f4ea}.error{background:#fde8e8}.warning{background:#fff4e5}.info{background:#e8f0fe}\
pre{background:#f5f5f5;padding:.75rem;overflow-x:auto}";

const SIDES: [&str; 2] = ["BUY", "SELL"];
const ORDER_TYPES: [&str; 3] = ["MARKET", "LIMIT", "STOP_LIMIT"];
const TIME_IN_FORCE: [&str; 3] = ["GTC", "IOC", "FOK"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
    Warning(String),
    Info(String),
}

impl Notice {
    fn class(&self) -> &'static str {
        match self {
            Notice::Success(_) => "success",
            Notice::Error(_) => "error",
            Notice::Warning(_) => "warning",
            Notice::Info(_) => "info",
        }
    }

    fn text(&self) -> &str {
        match self {
            Notice::Success(text)
            | Notice::Error(text)
            | Notice::Warning(text)
            | Notice::Info(text) => text,
        }
    }
}

/// Escape text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>Binance Futures Testnet - Mini Trading Panel</h1>\n\
         <p><small>MARKET / LIMIT / STOP-LIMIT orders.</small></p>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

pub fn notices(items: &[Notice]) -> String {
    let mut out = String::new();
    for notice in items {
        let _ = writeln!(
            out,
            "<div class=\"notice {}\">{}</div>",
            notice.class(),
            escape(notice.text()).replace('\n', "<br>")
        );
    }
    out
}

pub fn json_block(json: &str) -> String {
    format!("<pre><code>{}</code></pre>", escape(json))
}

fn select(name: &str, label: &str, options: &[&str], current: &str) -> String {
    let mut out = format!("<label for=\"{name}\">{label}</label>\n<select id=\"{name}\" name=\"{name}\">");
    for option in options {
        let selected = if option.eq_ignore_ascii_case(current.trim()) {
            " selected"
        } else {
            ""
        };
        let _ = write!(out, "<option value=\"{option}\"{selected}>{option}</option>");
    }
    out.push_str("</select>\n");
    out
}

fn input(name: &str, label: &str, value: &str, placeholder: &str) -> String {
    format!(
        "<label for=\"{name}\">{label}</label>\n\
         <input id=\"{name}\" name=\"{name}\" value=\"{value}\" placeholder=\"{placeholder}\">\n",
        value = escape(value),
    )
}

pub fn order_form(form: &OrderForm) -> String {
    let mut out = String::from("<h2>Create Order</h2>\n<form method=\"post\" action=\"/order\">\n");
    out.push_str(&input("symbol", "Symbol", &form.symbol, "BTCUSDT, ETHUSDT"));
    out.push_str(&select("side", "Side", &SIDES, &form.side));
    out.push_str(&select("order_type", "Order type", &ORDER_TYPES, &form.order_type));
    out.push_str(&input("quantity", "Quantity", &form.quantity, "0.002"));
    out.push_str(&input(
        "price",
        "Limit price (LIMIT / STOP_LIMIT)",
        &form.price,
        "Price your limit order sits at",
    ));
    out.push_str(&input(
        "stop_price",
        "Stop price (STOP_LIMIT)",
        &form.stop_price,
        "Trigger price for the stop part",
    ));
    out.push_str(&select(
        "time_in_force",
        "Time in force",
        &TIME_IN_FORCE,
        &form.time_in_force,
    ));
    out.push_str("<button type=\"submit\">Place order</button>\n</form>\n");
    out.push_str("<p><a href=\"/account\">Load account info</a></p>\n");
    out
}

pub fn account_panel(row: Option<&AccountAsset>) -> String {
    let mut out = String::from("<h2>Futures Account (USDT-M)</h2>\n");
    match row {
        Some(row) => {
            let _ = writeln!(
                out,
                "<dl><dt>USDT wallet balance</dt><dd>{}</dd><dt>USDT available</dt><dd>{}</dd></dl>",
                row.wallet_balance.normalize(),
                row.available_balance.normalize()
            );
        }
        None => out.push_str("<p>No USDT entry found in account assets.</p>\n"),
    }
    out.push_str("<p><a href=\"/\">Back to order form</a></p>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x&y")</script>'"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;&#x27;"
        );
    }

    #[test]
    fn test_select_marks_current() {
        let html = select("side", "Side", &SIDES, "sell");
        assert!(html.contains("<option value=\"SELL\" selected>"));
        assert!(!html.contains("<option value=\"BUY\" selected>"));
    }

    #[test]
    fn test_order_form_escapes_values() {
        let form = OrderForm {
            symbol: "\"><b>".into(),
            ..OrderForm::initial()
        };
        let html = order_form(&form);
        assert!(html.contains("value=\"&quot;&gt;&lt;b&gt;\""));
        assert!(html.contains("<option value=\"MARKET\" selected>"));
        assert!(html.contains("<option value=\"GTC\" selected>"));
    }

    #[test]
    fn test_notices_keep_line_breaks() {
        let html = notices(&[Notice::Error("Code: -1\nMessage: <bad>".into())]);
        assert!(html.contains("class=\"notice error\""));
        assert!(html.contains("Code: -1<br>Message: &lt;bad&gt;"));
    }
}
