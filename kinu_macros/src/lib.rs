use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Defines the `tool!` macro for declaring tools.
///
/// Generates a unit struct named after the tool (`packing_weight` becomes
/// `PackingWeight`) with a `Tool` impl. Parameters are checked with the
/// serde-first validator and the full schemars root schema (definitions
/// included) is published as the parameter schema. The closure returns
/// `Result<serde_json::Value, E>` for any `E: Into<TravelError>`, so domain
/// errors keep their own code and plain `String` errors become `ToolExecution`.
#[proc_macro]
pub fn tool(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as ToolDefinition);

    let name = input.name;
    let description = input.description;
    let params_type = input.params_type;
    let execute_body = input.execute_body;

    let tool_struct = quote::format_ident!("{}", pascal_case(&name.value()));

    let expanded = quote! {
        #[derive(Debug, Clone, Copy, Default)]
        pub struct #tool_struct;

        impl kinu_travel::tools::Tool for #tool_struct {
            fn name(&self) -> &'static str {
                #name
            }

            fn description(&self) -> &'static str {
                #description
            }

            fn parameters_schema(&self) -> serde_json::Value {
                let schema = schemars::schema_for!(#params_type);
                serde_json::to_value(&schema).unwrap_or_else(|_| {
                    serde_json::json!({
                        "type": "object",
                        "properties": {},
                        "required": []
                    })
                })
            }

            fn execute(
                &self,
                parameters: serde_json::Value,
            ) -> std::pin::Pin<
                Box<
                    dyn std::future::Future<Output = std::result::Result<serde_json::Value, kinu_travel::TravelError>>
                        + Send
                        + '_,
                >,
            > {
                Box::pin(async move {
                    let params: #params_type =
                        kinu_travel::Validator::SerdeFirst.validate(parameters)?;

                    let handler = #execute_body;
                    handler(params)
                        .await
                        .map_err(::std::convert::Into::<kinu_travel::TravelError>::into)
                })
            }
        }
    };

    TokenStream::from(expanded)
}

/// `trip_countdown` -> `TripCountdown`
fn pascal_case(snake: &str) -> String {
    snake
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

struct ToolDefinition {
    name: syn::LitStr,
    description: syn::LitStr,
    params_type: syn::Type,
    execute_body: syn::ExprClosure,
}

fn parse_named_assignment<T: syn::parse::Parse>(
    input: syn::parse::ParseStream,
    keyword: &str,
) -> syn::Result<T> {
    let ident: syn::Ident = input.parse()?;
    if ident != keyword {
        return Err(syn::Error::new_spanned(
            ident,
            format!("expected '{keyword}'"),
        ));
    }
    input.parse::<syn::Token![=]>()?;
    let value = input.parse::<T>()?;
    input.parse::<syn::Token![,]>()?;
    Ok(value)
}

impl syn::parse::Parse for ToolDefinition {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let name = parse_named_assignment::<syn::LitStr>(input, "name")?;
        let description = parse_named_assignment::<syn::LitStr>(input, "description")?;
        let params_type = parse_named_assignment::<syn::Type>(input, "params")?;
        let execute_body: syn::ExprClosure = input.parse()?;
        // Allow a trailing comma after the closure.
        let _ = input.parse::<Option<syn::Token![,]>>()?;

        Ok(ToolDefinition {
            name,
            description,
            params_type,
            execute_body,
        })
    }
}
