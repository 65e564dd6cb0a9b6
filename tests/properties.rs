use huffzip::huffman_coding::huffman::HuffmanTree;
use huffzip::huffman_coding::huffman_codes::CodeTable;
use huffzip::tools::freq_count::{FrequencyTable, SYMBOLS};
use huffzip::{decode_bytes, encode_bytes};
use proptest::collection::vec;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_round_trip(data in vec(any::<u8>(), 0..4096)) {
        let encoded = encode_bytes(&data).unwrap();
        prop_assert_eq!(decode_bytes(&encoded).unwrap(), data);
    }

    #[test]
    fn prop_round_trip_small_alphabet(data in vec(0_u8..4, 0..4096)) {
        let encoded = encode_bytes(&data).unwrap();
        prop_assert_eq!(decode_bytes(&encoded).unwrap(), data);
    }

    #[test]
    fn prop_tree_is_deterministic(counts in vec(0_u32..1000, SYMBOLS)) {
        let mut table = [0_u32; SYMBOLS];
        table.copy_from_slice(&counts);
        let freqs = FrequencyTable::from(table);
        let first = HuffmanTree::new(&freqs);
        let second = HuffmanTree::new(&freqs);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(CodeTable::from_tree(&first), CodeTable::from_tree(&second));
        prop_assert_eq!(first.weight(), freqs.total());
    }

    #[test]
    fn prop_trailing_bits_in_range(data in vec(any::<u8>(), 0..512)) {
        let encoded = encode_bytes(&data).unwrap();
        let stored = encoded[1024];
        prop_assert!((1..=8).contains(&stored));
    }
}
