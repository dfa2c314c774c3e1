/// Returns a frequency count of the input data, one slot per byte value.
pub fn freqs(data: &[u8]) -> [u32; 256] {
    let mut freqs = [0_u32; 256];
    data.iter().for_each(|&el| freqs[el as usize] += 1);
    freqs
}

#[cfg(test)]
mod test {
    use super::freqs;

    #[test]
    fn freqs_test() {
        let f = freqs(b"abracadabra");
        assert_eq!(f[b'a' as usize], 5);
        assert_eq!(f[b'b' as usize], 2);
        assert_eq!(f[b'r' as usize], 2);
        assert_eq!(f[b'c' as usize], 1);
        assert_eq!(f.iter().sum::<u32>(), 11);
    }

    #[test]
    fn empty_test() {
        assert!(freqs(&[]).iter().all(|&c| c == 0));
    }
}
