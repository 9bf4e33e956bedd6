use serde_json::Value;

/// Config classes whose names do not follow plain camel-casing of `model_type`.
const KNOWN_CLASSES: &[(&str, &str)] = &[
    ("gpt_neox", "GPTNeoXConfig"),
    ("gpt2", "GPT2Config"),
    ("gptj", "GPTJConfig"),
    ("gpt_bigcode", "GPTBigCodeConfig"),
    ("opt", "OPTConfig"),
    ("mpt", "MPTConfig"),
    ("t5", "T5Config"),
    ("rw", "RWConfig"),
];

fn first_number(config: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|k| config.get(*k).and_then(Value::as_u64))
}

fn show(n: Option<u64>) -> String {
    n.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string())
}

/// Name of the configuration class for a `config.json`, e.g. `GPTNeoXConfig`.
pub fn config_class_name(config: &Value) -> String {
    let Some(model_type) = config.get("model_type").and_then(Value::as_str) else {
        return "PretrainedConfig".to_string();
    };
    if let Some((_, class)) = KNOWN_CLASSES.iter().find(|(t, _)| *t == model_type) {
        return class.to_string();
    }
    let mut class: String = model_type
        .split(|c: char| c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    class.push_str("Config");
    class
}

/// Prints a configuration as `<Class> {json}` with sorted keys.
pub fn config_dump(config: &Value) -> String {
    let json = serde_json::to_string_pretty(config).unwrap_or_else(|_| config.to_string());
    format!("{} {}\n", config_class_name(config), json)
}

/// Module-tree outline of a causal language model, built from its `config.json`.
///
/// Sizes the config does not declare are printed as `?`.
pub fn architecture_outline(config: &Value) -> String {
    let hidden = first_number(config, &["hidden_size", "n_embd", "d_model"]);
    let layers = first_number(config, &["num_hidden_layers", "n_layer", "num_layers"]);
    let heads = first_number(config, &["num_attention_heads", "n_head"]);
    let kv_heads = first_number(config, &["num_key_value_heads"]);
    let intermediate = first_number(config, &["intermediate_size", "n_inner", "ffn_dim"]);
    let vocab = first_number(config, &["vocab_size"]);

    let class = config_class_name(config);
    let family = class.strip_suffix("Config").unwrap_or(&class).to_string();
    let top = config
        .get("architectures")
        .and_then(Value::as_array)
        .and_then(|a| a.first())
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}ForCausalLM", family));
    let norm = if config.get("rms_norm_eps").is_some() { "RMSNorm" } else { "LayerNorm" };
    let tied = config.get("tie_word_embeddings").and_then(Value::as_bool).unwrap_or(false);

    let layer_range = match layers {
        Some(0) => "(none)".to_string(),
        Some(1) => "(0)".to_string(),
        Some(n) => format!("(0-{})", n - 1),
        None => "(?)".to_string(),
    };
    let attention = match kv_heads {
        Some(kv) => format!("Attention(heads={}, kv_heads={})", show(heads), kv),
        None => format!("Attention(heads={})", show(heads)),
    };

    let h = show(hidden);
    let mut out = String::new();
    out.push_str(&format!("{}(\n", top));
    out.push_str(&format!("  (model): {}Model(\n", family));
    out.push_str(&format!("    (embed_tokens): Embedding({}, {})\n", show(vocab), h));
    out.push_str("    (layers): ModuleList(\n");
    out.push_str(&format!("      {}: {} x {}Layer(\n", layer_range, show(layers), family));
    out.push_str(&format!("        (input_layernorm): {}(({},))\n", norm, h));
    out.push_str(&format!("        (self_attn): {}\n", attention));
    out.push_str(&format!("        (post_attention_layernorm): {}(({},))\n", norm, h));
    out.push_str(&format!("        (mlp): MLP(in={}, hidden={}, out={})\n", h, show(intermediate), h));
    out.push_str("      )\n");
    out.push_str("    )\n");
    out.push_str(&format!("    (norm): {}(({},))\n", norm, h));
    out.push_str("  )\n");
    out.push_str(&format!(
        "  (lm_head): Linear(in_features={}, out_features={}, bias=False{})\n",
        h,
        show(vocab),
        if tied { ", tied" } else { "" }
    ));
    out.push(')');
    out
}
