/// Supplies boilerplate for files the executor actually creates or
/// repopulates. Implementations must be pure: same name in, same text out,
/// no side effects.
pub trait ContentProvider: Send + Sync {
    fn default_content(&self, file_name: &str) -> String;
}

/// Extension- and basename-keyed boilerplate. Unknown extensions yield an
/// empty string, which the executor treats as "nothing to write".
pub struct DefaultContentProvider;

impl DefaultContentProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ContentProvider for DefaultContentProvider {
    fn default_content(&self, file_name: &str) -> String {
        let name = file_name.to_lowercase();
        let stem = file_stem(file_name);
        let extension = name.rsplit('.').next().unwrap_or("");

        if name == ".gitignore" {
            return GITIGNORE.to_string();
        }

        match extension {
            "jsx" | "tsx" => component_template(&stem),
            "js" | "ts" | "mjs" | "cjs" => script_template(file_name, &stem),
            "css" | "scss" => STYLESHEET.to_string(),
            "html" => html_template(&stem),
            "md" => markdown_template(&stem),
            "json" => "{}\n".to_string(),
            "py" => PYTHON_MAIN.to_string(),
            "rs" if name == "main.rs" => RUST_MAIN.to_string(),
            "vue" => VUE_COMPONENT.to_string(),
            "svelte" => SVELTE_COMPONENT.to_string(),
            _ => String::new(),
        }
    }
}

fn script_template(file_name: &str, stem: &str) -> String {
    let name = file_name.to_lowercase();

    if name.starts_with("vite.config") {
        return "import { defineConfig } from 'vite';\n\nexport default defineConfig({});\n"
            .to_string();
    }
    if name.contains(".config") {
        return "module.exports = {};\n".to_string();
    }
    if stem == "index" {
        return "export {};\n".to_string();
    }
    if is_hook_name(stem) {
        return format!("export function {}() {{\n  return null;\n}}\n", camel_case(stem));
    }

    format!("export function {}() {{\n}}\n", camel_case(stem))
}

fn component_template(stem: &str) -> String {
    let name = pascal_case(stem);
    format!(
        "export default function {name}() {{\n  return <div>{name}</div>;\n}}\n"
    )
}

fn html_template(stem: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n  <head>\n    <meta charset=\"UTF-8\" />\n    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n    <title>{}</title>\n  </head>\n  <body>\n  </body>\n</html>\n",
        pascal_case(stem)
    )
}

fn markdown_template(stem: &str) -> String {
    format!("# {}\n\nDescribe {} here.\n", pascal_case(stem), stem)
}

const STYLESHEET: &str = "*,\n*::before,\n*::after {\n  box-sizing: border-box;\n}\n\nbody {\n  margin: 0;\n  font-family: system-ui, sans-serif;\n}\n";

const PYTHON_MAIN: &str = "def main():\n    pass\n\n\nif __name__ == \"__main__\":\n    main()\n";

const RUST_MAIN: &str = "fn main() {\n    println!(\"Hello, world!\");\n}\n";

const VUE_COMPONENT: &str = "<template>\n  <div />\n</template>\n\n<script setup>\n</script>\n";

const SVELTE_COMPONENT: &str = "<script>\n</script>\n\n<div />\n";

const GITIGNORE: &str = "node_modules/\ndist/\nbuild/\ncoverage/\n.env\n.env.local\n.DS_Store\n";

fn file_stem(file_name: &str) -> String {
    let base = file_name.trim_start_matches('.');
    match base.split('.').next() {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

fn is_hook_name(stem: &str) -> bool {
    stem.starts_with("use") && stem.chars().nth(3).map_or(false, |c| c.is_uppercase())
}

fn pascal_case(stem: &str) -> String {
    stem.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect()
}

fn camel_case(stem: &str) -> String {
    let pascal = pascal_case(stem);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => pascal,
    }
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
