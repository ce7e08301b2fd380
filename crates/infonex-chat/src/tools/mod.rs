//! Tool catalog and execution.
//!
//! `ToolRegistry` holds the descriptors advertised to the model;
//! `executor` runs the calls the model makes; `builtin` wires the
//! handlers behind the catalog; `services` holds the outbound ports
//! (search, image generation, PDF rendering) the handlers call into.

pub mod builtin;
pub mod executor;
pub mod services;

pub use builtin::builtin_executor;
pub use executor::{CatalogError, ToolExecutor, ToolFailure, ToolHandler};
pub use services::ToolServices;

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::ToolDescriptor;

/// The set of tools advertised to the model for a turn.
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Build a registry from a descriptor list. Later duplicates of a
    /// name shadow earlier ones in the index.
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        let index = tools
            .iter()
            .enumerate()
            .map(|(i, tool)| (tool.name.clone(), i))
            .collect();
        Self { tools, index }
    }

    /// The full built-in catalog.
    pub fn builtin() -> Self {
        Self::new(builtin_descriptors())
    }

    /// An empty registry, used when tools are disabled.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Convert a descriptor to the chat-completions tool format.
pub fn to_openai_tool(tool: &ToolDescriptor) -> Value {
    json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": tool.parameters,
        }
    })
}

/// The built-in tool descriptors Infonex exposes to models.
pub fn builtin_descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "web_search".to_string(),
            description: "Search the web and return the top results with titles, links and snippets.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Number of results to return (default 5)"
                    }
                },
                "required": ["query"]
            }),
        },
        ToolDescriptor {
            name: "news_headlines".to_string(),
            description: "Fetch current news headlines, optionally filtered by topic.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "topic": {
                        "type": "string",
                        "description": "Topic to search news for (e.g., 'technology')"
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Number of headlines to return (default 5)"
                    }
                }
            }),
        },
        ToolDescriptor {
            name: "generate_image".to_string(),
            description: "Generate an image from a text prompt. The image is shown to the user directly.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "prompt": {
                        "type": "string",
                        "description": "Description of the image to generate"
                    },
                    "size": {
                        "type": "string",
                        "description": "Image size such as '1024x1024' (optional)"
                    }
                },
                "required": ["prompt"]
            }),
        },
        ToolDescriptor {
            name: "generate_pdf".to_string(),
            description: "Render a PDF document from markdown content. The PDF is offered to the user directly.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Document title"
                    },
                    "content": {
                        "type": "string",
                        "description": "Markdown body of the document"
                    }
                },
                "required": ["title", "content"]
            }),
        },
        ToolDescriptor {
            name: "generate_qr_code".to_string(),
            description: "Generate a QR code image encoding the given text or URL.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "data": {
                        "type": "string",
                        "description": "Text or URL to encode"
                    }
                },
                "required": ["data"]
            }),
        },
        ToolDescriptor {
            name: "get_weather".to_string(),
            description: "Get the current weather for a location.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": "City name, e.g. 'Paris' or 'Paris,FR'"
                    }
                },
                "required": ["location"]
            }),
        },
        ToolDescriptor {
            name: "get_crypto_price".to_string(),
            description: "Get the current price of a cryptocurrency.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "coin": {
                        "type": "string",
                        "description": "Coin id, e.g. 'bitcoin' or 'ethereum'"
                    },
                    "currency": {
                        "type": "string",
                        "description": "Quote currency (default 'usd')"
                    }
                },
                "required": ["coin"]
            }),
        },
        ToolDescriptor {
            name: "get_stock_price".to_string(),
            description: "Get the latest quote for a stock ticker symbol.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "symbol": {
                        "type": "string",
                        "description": "Ticker symbol, e.g. 'AAPL'"
                    }
                },
                "required": ["symbol"]
            }),
        },
        ToolDescriptor {
            name: "define_word".to_string(),
            description: "Look up the dictionary definition of an English word.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "word": {
                        "type": "string",
                        "description": "The word to define"
                    }
                },
                "required": ["word"]
            }),
        },
        ToolDescriptor {
            name: "get_ip_info".to_string(),
            description: "Look up geolocation and network info for an IP address.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "ip": {
                        "type": "string",
                        "description": "IPv4 or IPv6 address; omit for the caller's own address"
                    }
                }
            }),
        },
        ToolDescriptor {
            name: "shorten_url".to_string(),
            description: "Shorten a long URL.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "The URL to shorten"
                    }
                },
                "required": ["url"]
            }),
        },
        ToolDescriptor {
            name: "generate_password".to_string(),
            description: "Generate a random password.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "length": {
                        "type": "integer",
                        "description": "Password length (default 16, max 128)"
                    },
                    "symbols": {
                        "type": "boolean",
                        "description": "Include punctuation symbols (default true)"
                    }
                }
            }),
        },
        ToolDescriptor {
            name: "get_current_time".to_string(),
            description: "Get the current date and time, optionally in a specific UTC offset.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "utc_offset": {
                        "type": "integer",
                        "description": "Hours east of UTC, e.g. -5 for New York (default 0)"
                    }
                }
            }),
        },
        ToolDescriptor {
            name: "calculate".to_string(),
            description: "Evaluate a simple arithmetic expression with two operands, e.g. '12.5 * 3'.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "expression": {
                        "type": "string",
                        "description": "Expression of the form '<a> <op> <b>' with op one of + - * / %"
                    }
                },
                "required": ["expression"]
            }),
        },
        ToolDescriptor {
            name: "convert_units".to_string(),
            description: "Convert a value between units of length, mass or temperature.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "value": {
                        "type": "number",
                        "description": "The numeric value to convert"
                    },
                    "from": {
                        "type": "string",
                        "description": "Source unit, e.g. 'km', 'lb', 'c'"
                    },
                    "to": {
                        "type": "string",
                        "description": "Target unit, e.g. 'mi', 'kg', 'f'"
                    }
                },
                "required": ["value", "from", "to"]
            }),
        },
        ToolDescriptor {
            name: "roll_dice".to_string(),
            description: "Roll one or more dice.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "sides": {
                        "type": "integer",
                        "description": "Sides per die (default 6)"
                    },
                    "count": {
                        "type": "integer",
                        "description": "Number of dice (default 1, max 20)"
                    }
                }
            }),
        },
        ToolDescriptor {
            name: "flip_coin".to_string(),
            description: "Flip a coin.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {}
            }),
        },
        ToolDescriptor {
            name: "random_number".to_string(),
            description: "Pick a random integer in an inclusive range.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "min": {
                        "type": "integer",
                        "description": "Lower bound (default 1)"
                    },
                    "max": {
                        "type": "integer",
                        "description": "Upper bound (default 100)"
                    }
                }
            }),
        },
        ToolDescriptor {
            name: "color_palette".to_string(),
            description: "Generate a palette of random colors as hex codes.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "count": {
                        "type": "integer",
                        "description": "Number of colors (default 5, max 12)"
                    }
                }
            }),
        },
        ToolDescriptor {
            name: "tell_joke".to_string(),
            description: "Tell a short joke.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {}
            }),
        },
    ]
}
