use schemars::{
    schema::{RootSchema, Schema, SchemaObject},
    JsonSchema,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::TypeId;

/// What `#[payload_schema]` records about a request record at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadMeta {
    /// Schema title; the struct name unless `name = "..."` is given.
    pub name: &'static str,
    /// API path the record is posted to, when it has exactly one.
    pub endpoint: Option<&'static str>,
    /// Extra lookup names, e.g. CLI subcommands.
    pub aliases: &'static [&'static str],
    pub description: Option<&'static str>,
    /// `(field, doc comment)` pairs.
    pub field_docs: &'static [(&'static str, &'static str)],
}

impl PayloadMeta {
    /// Last segment of the endpoint path: `/api/log_search` -> `log_search`.
    pub fn endpoint_name(&self) -> Option<&'static str> {
        self.endpoint
            .map(|path| path.rsplit('/').next().unwrap_or(path))
    }

    /// Whether `name` refers to this payload. Case is ignored and `-` matches `_`.
    pub fn answers_to(&self, name: &str) -> bool {
        let wanted = lookup_key(name);
        std::iter::once(self.name)
            .chain(self.endpoint_name())
            .chain(self.aliases.iter().copied())
            .any(|candidate| lookup_key(candidate) == wanted)
    }

    fn annotate(&self, root: &mut RootSchema) {
        let object = &mut root.schema;
        let metadata = object.metadata();
        // schemars titles the schema with the Rust type name
        metadata.title = Some(self.name.to_string());
        if let Some(description) = self.description {
            metadata
                .description
                .get_or_insert_with(|| description.to_string());
        }

        let Some(validation) = object.object.as_mut() else {
            return;
        };
        for (field, doc) in self.field_docs {
            if let Some(Schema::Object(property)) = validation.properties.get_mut(*field) {
                describe(property, doc);
            }
        }
    }
}

fn describe(property: &mut SchemaObject, doc: &str) {
    property
        .metadata()
        .description
        .get_or_insert_with(|| doc.to_string());
}

fn lookup_key(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('-', "_")
}

/// JSON schema of a request record, built once per type.
#[derive(Debug)]
pub struct SchemaHandle {
    meta: PayloadMeta,
    type_id: TypeId,
    json: Value,
}

impl SchemaHandle {
    /// Generate `T`'s schema and fold in the macro metadata.
    ///
    /// # Panics
    ///
    /// If the schema fails to serialize, which schemars-generated schemas never do.
    pub fn build<T: JsonSchema + 'static>(meta: PayloadMeta) -> Self {
        let mut root = schemars::schema_for!(T);
        meta.annotate(&mut root);
        let json = serde_json::to_value(root)
            .unwrap_or_else(|err| panic!("failed to serialize `{}` schema: {}", meta.name, err));

        Self {
            meta,
            type_id: TypeId::of::<T>(),
            json,
        }
    }

    pub fn name(&self) -> &'static str {
        self.meta.name
    }

    pub fn endpoint(&self) -> Option<&'static str> {
        self.meta.endpoint
    }

    pub fn meta(&self) -> &PayloadMeta {
        &self.meta
    }

    pub fn json(&self) -> &Value {
        &self.json
    }

    /// Whether this handle was built for `T`.
    pub fn describes<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

/// Implemented by `#[payload_schema]` for every request record.
pub trait PayloadSchema: DeserializeOwned + Send + Sync + 'static {
    const META: PayloadMeta;

    fn schema() -> &'static SchemaHandle;
}
