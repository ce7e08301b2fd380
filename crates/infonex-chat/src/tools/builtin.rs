//! Built-in tool handlers.
//!
//! One handler per catalog entry. The search/image/PDF handlers call
//! through the `services` ports; the quote-style handlers hit small
//! public HTTP APIs; the rest are local computation.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{FixedOffset, Utc};
use qrcode::render::svg;
use qrcode::QrCode;
use rand::Rng;
use regex::Regex;
use serde_json::{json, Value};

use super::executor::{ToolExecutor, ToolFailure, ToolHandler};
use super::services::{ImageGenerator, PdfRenderer, SearchHit, SearchProvider, ToolServices};

/// Build the executor backing the built-in catalog.
pub fn builtin_executor(services: &ToolServices, default_image_size: &str) -> ToolExecutor {
    let http = reqwest::Client::new();
    let mut executor = ToolExecutor::new();
    executor.register(
        "web_search",
        Box::new(WebSearchHandler {
            search: services.search.clone(),
        }),
    );
    executor.register(
        "news_headlines",
        Box::new(NewsHandler {
            search: services.search.clone(),
        }),
    );
    executor.register(
        "generate_image",
        Box::new(GenerateImageHandler {
            images: services.images.clone(),
            default_size: default_image_size.to_string(),
        }),
    );
    executor.register(
        "generate_pdf",
        Box::new(GeneratePdfHandler {
            pdf: services.pdf.clone(),
        }),
    );
    executor.register("generate_qr_code", Box::new(QrCodeHandler));
    executor.register("get_weather", Box::new(WeatherHandler { http: http.clone() }));
    executor.register(
        "get_crypto_price",
        Box::new(CryptoPriceHandler { http: http.clone() }),
    );
    executor.register(
        "get_stock_price",
        Box::new(StockPriceHandler { http: http.clone() }),
    );
    executor.register(
        "define_word",
        Box::new(DefineWordHandler { http: http.clone() }),
    );
    executor.register("get_ip_info", Box::new(IpInfoHandler { http: http.clone() }));
    executor.register("shorten_url", Box::new(ShortenUrlHandler { http }));
    executor.register("generate_password", Box::new(PasswordHandler));
    executor.register("get_current_time", Box::new(CurrentTimeHandler));
    executor.register("calculate", Box::new(CalculateHandler));
    executor.register("convert_units", Box::new(ConvertUnitsHandler));
    executor.register("roll_dice", Box::new(RollDiceHandler));
    executor.register("flip_coin", Box::new(FlipCoinHandler));
    executor.register("random_number", Box::new(RandomNumberHandler));
    executor.register("color_palette", Box::new(ColorPaletteHandler));
    executor.register("tell_joke", Box::new(TellJokeHandler));
    executor
}

// ===== Argument helpers =====

fn required_str<'a>(args: &'a Value, key: &'static str) -> Result<&'a str, ToolFailure> {
    args[key]
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .ok_or(ToolFailure::MissingArgument(key))
}

fn optional_str<'a>(args: &'a Value, key: &str, default: &'a str) -> &'a str {
    args[key]
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default)
}

fn optional_u64(args: &Value, key: &str, default: u64) -> u64 {
    args[key].as_u64().unwrap_or(default)
}

fn optional_i64(args: &Value, key: &str, default: i64) -> i64 {
    args[key].as_i64().unwrap_or(default)
}

fn optional_bool(args: &Value, key: &str, default: bool) -> bool {
    args[key].as_bool().unwrap_or(default)
}

/// Accept both JSON numbers and numeric strings; models send either.
fn required_number(args: &Value, key: &'static str) -> Result<f64, ToolFailure> {
    if let Some(n) = args[key].as_f64() {
        return Ok(n);
    }
    if let Some(s) = args[key].as_str() {
        return s
            .trim()
            .parse()
            .map_err(|_| ToolFailure::InvalidArgument(key, format!("not a number: {s}")));
    }
    Err(ToolFailure::MissingArgument(key))
}

/// Trim trailing zeros from a fixed-precision rendering.
fn format_number(x: f64) -> String {
    let s = format!("{x:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

// ===== Artifact envelopes =====

fn image_envelope(url: &str, message: &str) -> String {
    json!({
        "type": "image_generation_result",
        "display_image": true,
        "image_url": url,
        "message": message,
    })
    .to_string()
}

fn pdf_envelope(url: &str, title: &str, message: &str) -> String {
    json!({
        "type": "pdf_generation_result",
        "display_pdf": true,
        "pdf_url": url,
        "title": title,
        "message": message,
    })
    .to_string()
}

// ===== Search tools =====

fn format_hits(hits: &[SearchHit]) -> String {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| format!("{}. {}\n   {}\n   {}", i + 1, hit.title, hit.link, hit.snippet))
        .collect::<Vec<_>>()
        .join("\n")
}

struct WebSearchHandler {
    search: Arc<dyn SearchProvider>,
}

#[async_trait]
impl ToolHandler for WebSearchHandler {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
        let query = required_str(args, "query")?;
        let max = optional_u64(args, "max_results", 5).clamp(1, 10) as usize;
        let hits = self.search.search(query, max).await?;
        if hits.is_empty() {
            return Ok(format!("no results found for '{query}'"));
        }
        Ok(format!("results for '{query}':\n{}", format_hits(&hits)))
    }
}

struct NewsHandler {
    search: Arc<dyn SearchProvider>,
}

#[async_trait]
impl ToolHandler for NewsHandler {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
        let topic = optional_str(args, "topic", "top stories");
        let max = optional_u64(args, "max_results", 5).clamp(1, 10) as usize;
        let hits = self.search.news(topic, max).await?;
        if hits.is_empty() {
            return Ok(format!("no headlines found for '{topic}'"));
        }
        Ok(format!("headlines for '{topic}':\n{}", format_hits(&hits)))
    }
}

// ===== Artifact tools =====

struct GenerateImageHandler {
    images: Arc<dyn ImageGenerator>,
    default_size: String,
}

#[async_trait]
impl ToolHandler for GenerateImageHandler {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
        let prompt = required_str(args, "prompt")?;
        let size = optional_str(args, "size", &self.default_size);
        let url = self.images.generate(prompt, size).await?;
        Ok(image_envelope(
            &url,
            &format!("Here is the image for \"{prompt}\"."),
        ))
    }
}

struct GeneratePdfHandler {
    pdf: Arc<dyn PdfRenderer>,
}

#[async_trait]
impl ToolHandler for GeneratePdfHandler {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
        let title = required_str(args, "title")?;
        let content = required_str(args, "content")?;
        let url = self.pdf.render(title, content).await?;
        Ok(pdf_envelope(
            &url,
            title,
            &format!("Your document \"{title}\" is ready."),
        ))
    }
}

struct QrCodeHandler;

#[async_trait]
impl ToolHandler for QrCodeHandler {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
        let data = required_str(args, "data")?;
        let code = QrCode::new(data.as_bytes())
            .map_err(|e| ToolFailure::InvalidArgument("data", e.to_string()))?;
        let image = code
            .render::<svg::Color>()
            .min_dimensions(256, 256)
            .build();
        let url = format!("data:image/svg+xml;base64,{}", STANDARD.encode(image));
        let shown: String = if data.chars().count() > 48 {
            let head: String = data.chars().take(48).collect();
            format!("{head}...")
        } else {
            data.to_string()
        };
        Ok(image_envelope(&url, &format!("QR code for {shown}")))
    }
}

// ===== Public-API tools =====

struct WeatherHandler {
    http: reqwest::Client,
}

#[async_trait]
impl ToolHandler for WeatherHandler {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
        let location = required_str(args, "location")?;
        let url = format!("https://wttr.in/{}?format=j1", location.replace(' ', "+"));
        let json = get_json(&self.http, &url, "weather").await?;
        let current = &json["current_condition"][0];
        if current.is_null() {
            return Err(ToolFailure::Upstream(format!(
                "no weather data for '{location}'"
            )));
        }
        Ok(format!(
            "Weather in {location}: {}, {}°C (feels like {}°C), humidity {}%, wind {} km/h",
            current["weatherDesc"][0]["value"].as_str().unwrap_or("unknown"),
            current["temp_C"].as_str().unwrap_or("?"),
            current["FeelsLikeC"].as_str().unwrap_or("?"),
            current["humidity"].as_str().unwrap_or("?"),
            current["windspeedKmph"].as_str().unwrap_or("?"),
        ))
    }
}

struct CryptoPriceHandler {
    http: reqwest::Client,
}

#[async_trait]
impl ToolHandler for CryptoPriceHandler {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
        let coin = required_str(args, "coin")?.trim().to_lowercase();
        let currency = optional_str(args, "currency", "usd").trim().to_lowercase();
        let url = format!(
            "https://api.coingecko.com/api/v3/simple/price?ids={coin}&vs_currencies={currency}"
        );
        let json = get_json(&self.http, &url, "price").await?;
        let price = json[&coin][&currency]
            .as_f64()
            .ok_or_else(|| ToolFailure::Upstream(format!("no price data for '{coin}'")))?;
        Ok(format!(
            "1 {coin} = {} {}",
            format_number(price),
            currency.to_uppercase()
        ))
    }
}

struct StockPriceHandler {
    http: reqwest::Client,
}

#[async_trait]
impl ToolHandler for StockPriceHandler {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
        let symbol = required_str(args, "symbol")?.trim().to_string();
        let mut ticker = symbol.to_lowercase();
        if !ticker.contains('.') {
            ticker.push_str(".us");
        }
        let url = format!("https://stooq.com/q/l/?s={ticker}&f=sd2t2ohlcv&h&e=csv");
        let body = get_text(&self.http, &url, "quote").await?;
        let line = body
            .lines()
            .nth(1)
            .ok_or_else(|| ToolFailure::Upstream(format!("no quote data for '{symbol}'")))?;
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 8 || fields[6] == "N/D" || fields[1] == "N/D" {
            return Err(ToolFailure::Upstream(format!("no quote data for '{symbol}'")));
        }
        Ok(format!(
            "{}: close {} (open {}, high {}, low {}) on {}",
            symbol.to_uppercase(),
            fields[6],
            fields[3],
            fields[4],
            fields[5],
            fields[1],
        ))
    }
}

struct DefineWordHandler {
    http: reqwest::Client,
}

#[async_trait]
impl ToolHandler for DefineWordHandler {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
        let word = required_str(args, "word")?.trim().to_lowercase();
        if word.contains(char::is_whitespace) {
            return Err(ToolFailure::InvalidArgument(
                "word",
                "expected a single word".into(),
            ));
        }
        let url = format!("https://api.dictionaryapi.dev/api/v2/entries/en/{word}");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ToolFailure::Upstream(format!("dictionary request failed: {e}")))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ToolFailure::Upstream(format!(
                "no definition found for '{word}'"
            )));
        }
        if !response.status().is_success() {
            return Err(ToolFailure::Upstream(format!(
                "dictionary returned HTTP {}",
                response.status()
            )));
        }
        let json: Value = response
            .json()
            .await
            .map_err(|e| ToolFailure::Upstream(format!("invalid dictionary response: {e}")))?;

        let meanings = json[0]["meanings"]
            .as_array()
            .cloned()
            .unwrap_or_default();
        let mut lines = Vec::new();
        for meaning in meanings.iter().take(3) {
            let pos = meaning["partOfSpeech"].as_str().unwrap_or("?");
            if let Some(def) = meaning["definitions"][0]["definition"].as_str() {
                lines.push(format!("({pos}) {def}"));
            }
        }
        if lines.is_empty() {
            return Err(ToolFailure::Upstream(format!(
                "no definition found for '{word}'"
            )));
        }
        Ok(format!("{word}:\n{}", lines.join("\n")))
    }
}

struct IpInfoHandler {
    http: reqwest::Client,
}

#[async_trait]
impl ToolHandler for IpInfoHandler {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
        let ip = optional_str(args, "ip", "");
        let url = format!("http://ip-api.com/json/{ip}");
        let json = get_json(&self.http, &url, "ip lookup").await?;
        if json["status"].as_str() != Some("success") {
            let message = json["message"].as_str().unwrap_or("lookup failed");
            return Err(ToolFailure::Upstream(format!("ip lookup failed: {message}")));
        }
        Ok(format!(
            "IP {}: {}, {}, {} ({})",
            json["query"].as_str().unwrap_or("?"),
            json["city"].as_str().unwrap_or("?"),
            json["regionName"].as_str().unwrap_or("?"),
            json["country"].as_str().unwrap_or("?"),
            json["isp"].as_str().unwrap_or("?"),
        ))
    }
}

struct ShortenUrlHandler {
    http: reqwest::Client,
}

#[async_trait]
impl ToolHandler for ShortenUrlHandler {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
        let url = required_str(args, "url")?;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ToolFailure::InvalidArgument(
                "url",
                "must start with http:// or https://".into(),
            ));
        }
        let response = self
            .http
            .get("https://tinyurl.com/api-create.php")
            .query(&[("url", url)])
            .send()
            .await
            .map_err(|e| ToolFailure::Upstream(format!("shortener request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(ToolFailure::Upstream(format!(
                "shortener returned HTTP {}",
                response.status()
            )));
        }
        let short = response
            .text()
            .await
            .map_err(|e| ToolFailure::Upstream(format!("invalid shortener response: {e}")))?;
        Ok(format!("Shortened URL: {}", short.trim()))
    }
}

async fn get_json(http: &reqwest::Client, url: &str, what: &str) -> Result<Value, ToolFailure> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| ToolFailure::Upstream(format!("{what} request failed: {e}")))?;
    if !response.status().is_success() {
        return Err(ToolFailure::Upstream(format!(
            "{what} returned HTTP {}",
            response.status()
        )));
    }
    response
        .json()
        .await
        .map_err(|e| ToolFailure::Upstream(format!("invalid {what} response: {e}")))
}

async fn get_text(http: &reqwest::Client, url: &str, what: &str) -> Result<String, ToolFailure> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| ToolFailure::Upstream(format!("{what} request failed: {e}")))?;
    if !response.status().is_success() {
        return Err(ToolFailure::Upstream(format!(
            "{what} returned HTTP {}",
            response.status()
        )));
    }
    response
        .text()
        .await
        .map_err(|e| ToolFailure::Upstream(format!("invalid {what} response: {e}")))
}

// ===== Local tools =====

struct PasswordHandler;

const PASSWORD_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const PASSWORD_DIGITS: &str = "0123456789";
const PASSWORD_SYMBOLS: &str = "!@#$%^&*()-_=+[]{}";

#[async_trait]
impl ToolHandler for PasswordHandler {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
        let length = optional_u64(args, "length", 16).clamp(4, 128) as usize;
        let symbols = optional_bool(args, "symbols", true);

        let mut charset: Vec<char> = PASSWORD_LETTERS.chars().collect();
        charset.extend(PASSWORD_DIGITS.chars());
        if symbols {
            charset.extend(PASSWORD_SYMBOLS.chars());
        }

        let mut rng = rand::thread_rng();
        let password: String = (0..length)
            .map(|_| charset[rng.gen_range(0..charset.len())])
            .collect();
        Ok(format!("Generated password ({length} chars): {password}"))
    }
}

struct CurrentTimeHandler;

#[async_trait]
impl ToolHandler for CurrentTimeHandler {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
        let hours = optional_i64(args, "utc_offset", 0);
        if !(-12..=14).contains(&hours) {
            return Err(ToolFailure::InvalidArgument(
                "utc_offset",
                format!("offset out of range: {hours}"),
            ));
        }
        let offset = FixedOffset::east_opt((hours * 3600) as i32).ok_or_else(|| {
            ToolFailure::InvalidArgument("utc_offset", format!("offset out of range: {hours}"))
        })?;
        let now = Utc::now().with_timezone(&offset);
        Ok(now.format("%A, %Y-%m-%d %H:%M:%S %:z").to_string())
    }
}

struct CalculateHandler;

static EXPR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*([+\-*/%])\s*(-?\d+(?:\.\d+)?)\s*$").unwrap()
});

#[async_trait]
impl ToolHandler for CalculateHandler {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
        let expression = required_str(args, "expression")?;
        let caps = EXPR_RE.captures(expression).ok_or_else(|| {
            ToolFailure::InvalidArgument(
                "expression",
                format!("expected '<a> <op> <b>', got: {expression}"),
            )
        })?;
        let a: f64 = caps[1].parse().map_err(|_| {
            ToolFailure::InvalidArgument("expression", format!("bad operand: {}", &caps[1]))
        })?;
        let b: f64 = caps[3].parse().map_err(|_| {
            ToolFailure::InvalidArgument("expression", format!("bad operand: {}", &caps[3]))
        })?;
        let op = &caps[2];
        if (op == "/" || op == "%") && b == 0.0 {
            return Err(ToolFailure::InvalidArgument(
                "expression",
                "division by zero".into(),
            ));
        }
        let result = match op {
            "+" => a + b,
            "-" => a - b,
            "*" => a * b,
            "/" => a / b,
            "%" => a % b,
            _ => unreachable!(),
        };
        Ok(format!("{} = {}", expression.trim(), format_number(result)))
    }
}

struct ConvertUnitsHandler;

fn length_meters(unit: &str) -> Option<f64> {
    Some(match unit {
        "mm" => 0.001,
        "cm" => 0.01,
        "m" | "meter" | "meters" => 1.0,
        "km" | "kilometer" | "kilometers" => 1000.0,
        "in" | "inch" | "inches" => 0.0254,
        "ft" | "foot" | "feet" => 0.3048,
        "yd" | "yard" | "yards" => 0.9144,
        "mi" | "mile" | "miles" => 1609.344,
        _ => return None,
    })
}

fn mass_kilograms(unit: &str) -> Option<f64> {
    Some(match unit {
        "mg" => 1e-6,
        "g" | "gram" | "grams" => 0.001,
        "kg" | "kilogram" | "kilograms" => 1.0,
        "oz" | "ounce" | "ounces" => 0.028_349_5,
        "lb" | "lbs" | "pound" | "pounds" => 0.453_592,
        "t" | "tonne" | "tonnes" => 1000.0,
        _ => return None,
    })
}

fn to_celsius(value: f64, unit: &str) -> Option<f64> {
    Some(match unit {
        "c" | "celsius" => value,
        "f" | "fahrenheit" => (value - 32.0) * 5.0 / 9.0,
        "k" | "kelvin" => value - 273.15,
        _ => return None,
    })
}

fn from_celsius(celsius: f64, unit: &str) -> Option<f64> {
    Some(match unit {
        "c" | "celsius" => celsius,
        "f" | "fahrenheit" => celsius * 9.0 / 5.0 + 32.0,
        "k" | "kelvin" => celsius + 273.15,
        _ => return None,
    })
}

#[async_trait]
impl ToolHandler for ConvertUnitsHandler {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
        let value = required_number(args, "value")?;
        let from = required_str(args, "from")?.trim().to_lowercase();
        let to = required_str(args, "to")?.trim().to_lowercase();

        let result = if let (Some(c), Some(_)) = (to_celsius(value, &from), from_celsius(0.0, &to))
        {
            from_celsius(c, &to)
        } else if let (Some(a), Some(b)) = (length_meters(&from), length_meters(&to)) {
            Some(value * a / b)
        } else if let (Some(a), Some(b)) = (mass_kilograms(&from), mass_kilograms(&to)) {
            Some(value * a / b)
        } else {
            None
        };

        match result {
            Some(converted) => Ok(format!(
                "{} {from} = {} {to}",
                format_number(value),
                format_number(converted)
            )),
            None => Err(ToolFailure::InvalidArgument(
                "to",
                format!("cannot convert {from} to {to}"),
            )),
        }
    }
}

struct RollDiceHandler;

#[async_trait]
impl ToolHandler for RollDiceHandler {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
        let sides = optional_u64(args, "sides", 6).clamp(2, 1000);
        let count = optional_u64(args, "count", 1).clamp(1, 20);
        let mut rng = rand::thread_rng();
        let rolls: Vec<u64> = (0..count).map(|_| rng.gen_range(1..=sides)).collect();
        let total: u64 = rolls.iter().sum();
        let list = rolls
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("rolled {count}d{sides}: {list} (total {total})"))
    }
}

struct FlipCoinHandler;

#[async_trait]
impl ToolHandler for FlipCoinHandler {
    async fn run(&self, _args: &Value) -> Result<String, ToolFailure> {
        let heads = rand::thread_rng().gen_bool(0.5);
        Ok(if heads { "heads" } else { "tails" }.to_string())
    }
}

struct RandomNumberHandler;

#[async_trait]
impl ToolHandler for RandomNumberHandler {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
        let min = optional_i64(args, "min", 1);
        let max = optional_i64(args, "max", 100);
        if min > max {
            return Err(ToolFailure::InvalidArgument(
                "min",
                format!("{min} is greater than max {max}"),
            ));
        }
        let n = rand::thread_rng().gen_range(min..=max);
        Ok(n.to_string())
    }
}

struct ColorPaletteHandler;

#[async_trait]
impl ToolHandler for ColorPaletteHandler {
    async fn run(&self, args: &Value) -> Result<String, ToolFailure> {
        let count = optional_u64(args, "count", 5).clamp(1, 12);
        let mut rng = rand::thread_rng();
        let colors: Vec<String> = (0..count)
            .map(|_| {
                format!(
                    "#{:02x}{:02x}{:02x}",
                    rng.gen::<u8>(),
                    rng.gen::<u8>(),
                    rng.gen::<u8>()
                )
            })
            .collect();
        Ok(colors.join(", "))
    }
}

struct TellJokeHandler;

const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs.",
    "There are only two hard things in computer science: cache invalidation, naming things, and off-by-one errors.",
    "A SQL query walks into a bar, goes up to two tables and asks: may I join you?",
    "Why did the developer go broke? Because they used up all their cache.",
    "I told my computer I needed a break, and now it won't stop sending me KitKat ads.",
    "Why do Java developers wear glasses? Because they don't C#.",
    "How many programmers does it take to change a light bulb? None, that's a hardware problem.",
    "A UDP packet walks into a bar. The bartender doesn't acknowledge it.",
];

#[async_trait]
impl ToolHandler for TellJokeHandler {
    async fn run(&self, _args: &Value) -> Result<String, ToolFailure> {
        let i = rand::thread_rng().gen_range(0..JOKES.len());
        Ok(JOKES[i].to_string())
    }
}
