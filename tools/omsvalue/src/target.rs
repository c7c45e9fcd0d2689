use clap::ValueEnum;
use omsconnect::{
    Schema, SchemaBuilder, SchemaRef,
    core::logical,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum Target {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Bytes,
    List,
    Map,
    Struct,
    Date,
    Time,
    Timestamp,
    Decimal,
}

impl Target {
    /// Schema to convert into; `scale` only applies to `decimal`.
    pub fn schema(&self, scale: i32) -> SchemaRef {
        match self {
            Target::Bool => Schema::boolean(),
            Target::Int8 => Schema::int8(),
            Target::Int16 => Schema::int16(),
            Target::Int32 => Schema::int32(),
            Target::Int64 => Schema::int64(),
            Target::Float32 => Schema::float32(),
            Target::Float64 => Schema::float64(),
            Target::String => Schema::string(),
            Target::Bytes => Schema::bytes(),
            Target::List => SchemaBuilder::array(Schema::optional_string()).build(),
            Target::Map => {
                SchemaBuilder::map(Schema::string(), Schema::optional_string()).build()
            }
            Target::Struct => SchemaBuilder::new_struct().build(),
            Target::Date => logical::date::schema(),
            Target::Time => logical::time::schema(),
            Target::Timestamp => logical::timestamp::schema(),
            Target::Decimal => logical::decimal::schema(scale),
        }
    }
}
