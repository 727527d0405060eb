#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use std::{borrow::Cow, str::FromStr};
    use tabula_core::{AsValue, Value};
    use uuid::Uuid;

    #[test]
    fn integers() {
        assert_eq!(7i8.as_value(), Value::Int8(Some(7)));
        assert_eq!(u64::as_empty_value(), Value::UInt64(None));
        assert_eq!(i64::try_from_value(Value::Int32(Some(-3))).unwrap(), -3);
        assert_eq!(i32::try_from_value(Value::Int64(Some(1 << 20))).unwrap(), 1 << 20);
        assert!(i8::try_from_value(Value::Int32(Some(300))).is_err());
        assert!(u32::try_from_value(Value::Int16(Some(-1))).is_err());
        assert_eq!(
            i32::try_from_value(Value::Decimal(Some(Decimal::from(12)))).unwrap(),
            12
        );
        assert!(i32::try_from_value(Value::Decimal(Some(Decimal::from_str("1.5").unwrap()))).is_err());
        assert!(i32::try_from_value(Value::Varchar(Some("1".into()))).is_err());
        assert!(i32::try_from_value(Value::Null).is_err());
    }

    #[test]
    fn nullable() {
        assert_eq!(Option::<i32>::None.as_value(), Value::Int32(None));
        assert_eq!(Some(5i16).as_value(), Value::Int16(Some(5)));
        assert_eq!(Option::<String>::as_empty_value(), Value::Varchar(None));
        assert_eq!(Option::<i32>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(Option::<i32>::try_from_value(Value::Int32(None)).unwrap(), None);
        assert_eq!(
            Option::<i32>::try_from_value(Value::Int64(Some(9))).unwrap(),
            Some(9)
        );
        assert!(Value::Varchar(None).is_null());
        assert!(!Value::Varchar(Some(String::new())).is_null());
    }

    #[test]
    fn text() {
        assert_eq!(Value::from("abc"), Value::Varchar(Some("abc".into())));
        assert_eq!(
            Cow::<'static, str>::try_from_value(Value::Varchar(Some("x".into()))).unwrap(),
            "x"
        );
        assert_eq!(char::try_from_value(Value::Varchar(Some("z".into()))).unwrap(), 'z');
        let error = char::try_from_value(Value::Varchar(Some("zz".into()))).unwrap_err();
        assert!(error.to_string().contains("`zz`"));
        assert!(char::try_from_value(Value::Varchar(Some(String::new()))).is_err());
        assert_eq!(String::try_from_value(Value::Char(Some('q'))).unwrap(), "q");
    }

    #[test]
    fn other_types() {
        assert!(bool::try_from_value(Value::Int8(Some(1))).unwrap());
        assert!(!bool::try_from_value(Value::Int32(Some(0))).unwrap());
        assert!(bool::try_from_value(Value::UInt16(Some(2))).unwrap());
        assert!(bool::try_from_value(Value::UInt32(Some(1))).unwrap());
        assert!(!bool::try_from_value(Value::UInt64(Some(0))).unwrap());
        assert!(bool::try_from_value(Value::Float64(Some(1.0))).is_err());
        assert_eq!(
            Decimal::try_from_value(Value::UInt16(Some(3))).unwrap(),
            Decimal::from(3)
        );
        assert_eq!(f64::try_from_value(Value::Float32(Some(0.5))).unwrap(), 0.5);
        assert_eq!(
            Decimal::try_from_value(Value::Int64(Some(10))).unwrap(),
            Decimal::from(10)
        );
        let uuid = Uuid::from_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(
            Uuid::try_from_value(Value::Varchar(Some(uuid.to_string()))).unwrap(),
            uuid
        );
        assert_eq!(
            Uuid::try_from_value(Value::Blob(Some(uuid.as_bytes().to_vec().into()))).unwrap(),
            uuid
        );
        assert!(Uuid::try_from_value(Value::Varchar(Some("nope".into()))).is_err());
        assert_eq!(
            Vec::<u8>::try_from_value(vec![1u8, 2, 3].as_value()).unwrap(),
            [1, 2, 3]
        );
    }

    #[test]
    fn compare_and_display() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Int32(Some(1)), Value::Int64(Some(1)));
        assert_ne!(Value::Int32(Some(1)), Value::Int32(None));
        assert!(Value::Int16(None).same_type(&Value::Int16(Some(3))));
        assert!(Value::UInt8(None).is_integral());
        assert!(!Value::Decimal(None).is_integral());
        assert_eq!(Value::Int32(Some(5)).to_string(), "5");
        assert_eq!(Value::Varchar(None).to_string(), "NULL");
        assert_eq!(Value::Blob(Some([1, 2].into())).to_string(), "<2 bytes>");
    }
}
