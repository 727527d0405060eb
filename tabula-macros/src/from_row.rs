use crate::decode_table::TableParsed;
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

/// Body of `Entity::from_row`.
///
/// Labels are matched to field names ignoring ASCII case. A mapped field that
/// is missing from the row decodes from NULL, so only non nullable fields make
/// it fail. Ignored fields take their `Default`.
pub(crate) fn from_row(table: &TableParsed) -> TokenStream {
    let struct_name = &table.item.ident;
    let mapped = || table.columns.iter().filter(|c| !c.def.ignored);
    // Never named after the field alone, it would shadow `row`
    let holder = |ident: &Ident| format_ident!("__field_{}", ident);
    let holders = mapped().map(|c| {
        let ident = holder(&c.ident);
        let ty = &c.ty;
        quote!(let mut #ident: Option<#ty> = None;)
    });
    let assignments = mapped().map(|c| {
        let ident = holder(&c.ident);
        let ty = &c.ty;
        let name = c.def.name.as_ref();
        quote! {
            if __n__.eq_ignore_ascii_case(#name) {
                #ident = Some(
                    <#ty as ::tabula::AsValue>::try_from_value(__v__)
                        .map_err(|e| e.context(format!("While decoding field `{}` of `{}`", #name, stringify!(#struct_name))))?
                );
                continue;
            }
        }
    });
    let fields = table.columns.iter().map(|c| {
        let ident = &c.ident;
        let value = holder(ident);
        let ty = &c.ty;
        let name = c.def.name.as_ref();
        if c.def.ignored {
            quote!(#ident: ::std::default::Default::default())
        } else {
            quote! {
                #ident: match #value {
                    Some(v) => v,
                    None => <#ty as ::tabula::AsValue>::try_from_value(::tabula::Value::Null)
                        .map_err(|_| ::tabula::Error::msg(format!(
                            "Field `{}` of `{}` does not exist in the row provided",
                            #name,
                            stringify!(#struct_name),
                        )))?,
                }
            }
        }
    });
    quote! {
        #(#holders)*
        for (__n__, __v__) in ::std::iter::zip(row.labels.iter(), row.values.into_vec()) {
            #(#assignments)*
        }
        Ok(#struct_name {
            #(#fields,)*
        })
    }
}
