use crate::mapping::AttributeCheck;
use crate::source::SourceDataset;
use crate::Error;

/// Make sure every `(name, expected)` pair of the check matches the global
/// attributes of `source`, ignoring case.
pub(crate) fn validate<S>(source: &S, check: &AttributeCheck) -> Result<(), Error>
where
    S: SourceDataset + ?Sized,
{
    for (name, expected) in check.iter() {
        let found = source.global_attribute(name)?;

        let matches = found
            .as_deref()
            .map(|value| value.to_lowercase() == expected.to_lowercase())
            .unwrap_or(false);

        if !matches {
            return Err(Error::FormatMismatch {
                attribute: name.to_string(),
                expected: expected.to_string(),
                found,
            });
        }

        log::debug!("global attribute `{}` matches `{}`", name, expected);
    }

    Ok(())
}
