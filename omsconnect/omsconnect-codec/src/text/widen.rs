//! Common-schema tracking for parsed collections.

use omsconnect_core::{SchemaBuilder, SchemaRef, TypeKind};

fn numeric_rank(kind: TypeKind) -> Option<u8> {
    match kind {
        TypeKind::Int8 => Some(0),
        TypeKind::Int16 => Some(1),
        TypeKind::Int32 => Some(2),
        TypeKind::Int64 => Some(3),
        TypeKind::Float32 => Some(4),
        TypeKind::Float64 => Some(5),
        _ => None,
    }
}

/// Schema able to hold values of both `previous` and `candidate`.
///
/// Identical schemas are kept. Plain numeric schemas widen toward the wider
/// side along `int8 < int16 < int32 < int64 < float32 < float64`. Every other
/// pairing, including any logical schema, has no common schema.
pub(crate) fn common_schema(previous: &SchemaRef, candidate: &SchemaRef) -> Option<SchemaRef> {
    if previous == candidate {
        return Some(previous.clone());
    }
    if previous.name().is_some() || candidate.name().is_some() {
        return None;
    }
    let a = numeric_rank(previous.kind())?;
    let b = numeric_rank(candidate.kind())?;
    Some(if b > a { candidate.clone() } else { previous.clone() })
}

/// Running common schema over the elements of one collection position
/// (array elements, map keys or map values).
///
/// Nulls are skipped but make the final schema optional. Once two elements
/// disagree, or an element has no schema at all, the accumulator stays
/// degraded for the rest of the collection.
#[derive(Debug, Default)]
pub(crate) struct Widening {
    common: Option<SchemaRef>,
    degraded: bool,
    saw_null: bool,
}

impl Widening {
    pub fn observe(&mut self, schema: Option<&SchemaRef>, is_null: bool) {
        if is_null {
            self.saw_null = true;
            return;
        }
        if self.degraded {
            return;
        }
        let Some(candidate) = schema else {
            self.degraded = true;
            self.common = None;
            return;
        };
        self.common = match &self.common {
            None => Some(candidate.clone()),
            Some(previous) => common_schema(previous, candidate),
        };
        if self.common.is_none() {
            self.degraded = true;
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Final schema, optional if any null was observed.
    pub fn finish(self) -> Option<SchemaRef> {
        if self.degraded {
            return None;
        }
        let common = self.common?;
        if self.saw_null && !common.is_optional() {
            return Some(SchemaBuilder::from(common.as_ref()).optional().build());
        }
        Some(common)
    }
}

#[cfg(test)]
mod tests {
    use omsconnect_core::{Schema, logical};

    use super::*;

    #[test]
    fn numeric_widening_keeps_wider_side() {
        assert_eq!(
            common_schema(&Schema::int8(), &Schema::int32()),
            Some(Schema::int32())
        );
        assert_eq!(
            common_schema(&Schema::float64(), &Schema::int16()),
            Some(Schema::float64())
        );
        assert_eq!(common_schema(&Schema::string(), &Schema::int8()), None);
        assert_eq!(
            common_schema(&logical::date::schema(), &Schema::int32()),
            None
        );
    }

    #[test]
    fn early_mismatch_degrades_permanently() {
        let mut acc = Widening::default();
        acc.observe(Some(&Schema::string()), false);
        acc.observe(Some(&Schema::int8()), false);
        acc.observe(Some(&Schema::int8()), false);
        assert!(acc.is_degraded());
        assert_eq!(acc.finish(), None);
    }

    #[test]
    fn nulls_make_common_schema_optional() {
        let mut acc = Widening::default();
        acc.observe(Some(&Schema::int8()), false);
        acc.observe(None, true);
        acc.observe(Some(&Schema::int16()), false);
        assert_eq!(acc.finish(), Some(Schema::optional_int16()));
    }
}
