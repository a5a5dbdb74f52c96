use tera::Context;

use crate::prompt::Metadata;

pub fn build_context(metadata: &Metadata) -> Context {
    let mut context = Context::new();
    for (key, value) in metadata {
        context.insert(key, value);
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_is_inserted() {
        let mut metadata = Metadata::new();
        metadata.insert("name".into(), "my-app".into());
        metadata.insert("projectDes".into(), "A project named my-app".into());

        let context = build_context(&metadata);
        assert_eq!(context.get("name").unwrap(), "my-app");
        assert_eq!(
            context.get("projectDes").unwrap(),
            "A project named my-app"
        );
        assert!(context.get("missing").is_none());
    }
}
